use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Working-tree file status category, as reported by `git status --porcelain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Unmerged,
    Untracked,
    TypeChanged,
    Ignored,
}

impl FileStatus {
    /// Maps a two-letter porcelain `XY` code to a category.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "??" => return Some(FileStatus::Untracked),
            "!!" => return Some(FileStatus::Ignored),
            "AA" | "DD" => return Some(FileStatus::Unmerged),
            _ => {}
        }

        if code.contains('U') {
            return Some(FileStatus::Unmerged);
        }

        // Index column first; an unmodified index entry defers to the worktree.
        let mut columns = code.chars();
        let index = columns.next().filter(|c| *c != ' ');
        let worktree = columns.next().filter(|c| *c != ' ');

        match index.or(worktree)? {
            'R' => Some(FileStatus::Renamed),
            'C' => Some(FileStatus::Copied),
            'A' => Some(FileStatus::Added),
            'D' => Some(FileStatus::Deleted),
            'M' => Some(FileStatus::Modified),
            'T' => Some(FileStatus::TypeChanged),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Added => "Added",
            FileStatus::Modified => "Modified",
            FileStatus::Deleted => "Deleted",
            FileStatus::Renamed => "Renamed",
            FileStatus::Copied => "Copied",
            FileStatus::Unmerged => "Unmerged",
            FileStatus::Untracked => "Untracked",
            FileStatus::TypeChanged => "TypeChanged",
            FileStatus::Ignored => "Ignored",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category counts of uncommitted files. Empty means clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyState {
    counts: BTreeMap<FileStatus, usize>,
}

impl DirtyState {
    /// Parses raw porcelain v1 output.
    ///
    /// The output must not be trimmed first: a leading space is part of the
    /// `XY` code of the first line.
    pub fn from_porcelain(output: &str) -> Self {
        let mut counts = BTreeMap::new();

        for line in output.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let code = match (line.get(..2), line.as_bytes().get(2)) {
                (Some(code), Some(b' ')) => code,
                _ => match line.trim_start().split_once(' ') {
                    Some((code, _)) => code,
                    None => continue,
                },
            };

            if let Some(status) = FileStatus::from_code(code) {
                *counts.entry(status).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    pub fn is_clean(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileStatus, usize)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }

    /// Tab separated `Category: count` pairs, e.g. `Modified: 2\tUntracked: 1`.
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(status, count)| format!("{}: {}", status, count))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

impl fmt::Display for DirtyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Serialize for DirtyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labelled: BTreeMap<&str, usize> = self
            .counts
            .iter()
            .map(|(status, count)| (status.label(), *count))
            .collect();
        labelled.serialize(serializer)
    }
}
