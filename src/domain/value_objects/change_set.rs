use serde::Serialize;

/// One-line commit summaries between two revisions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    entries: Vec<String>,
}

impl ChangeSet {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Takes at most `cap` non-empty lines of `git log --oneline` output.
    pub fn from_log(output: &str, cap: usize) -> Self {
        Self {
            entries: output
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .take(cap)
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Changelog file body: one entry per line, CRLF terminated.
    pub fn to_changelog(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\r\n", entry))
            .collect()
    }
}
