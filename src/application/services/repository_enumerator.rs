use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::common::error::HelperError;
use crate::common::result::HelperResult;
use crate::infrastructure::filesystem::ManifestStore;

/// A project directory found under the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCandidate {
    /// Directory name, which is what the match pattern applies to.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
}

/// Finds project checkouts among the immediate subdirectories of a root.
///
/// Each call to [`RepositoryEnumerator::scan`] walks the root again, so a
/// long-lived enumerator never serves stale results.
#[derive(Debug, Clone)]
pub struct RepositoryEnumerator {
    root: PathBuf,
    manifests: ManifestStore,
    require_manifest: bool,
    pattern: Option<Regex>,
}

impl RepositoryEnumerator {
    /// `require_manifest == false` also accepts directories that are only
    /// git checkouts.
    pub fn new(
        root: impl Into<PathBuf>,
        manifest_files: Vec<String>,
        require_manifest: bool,
    ) -> Self {
        Self {
            root: root.into(),
            manifests: ManifestStore::new(manifest_files),
            require_manifest,
            pattern: None,
        }
    }

    /// Restricts the scan to directory names matching `pattern` (regular
    /// expression, unanchored).
    pub fn with_pattern(mut self, pattern: Option<&str>) -> HelperResult<Self> {
        self.pattern = pattern
            .map(|p| Regex::new(p).map_err(|e| HelperError::invalid_pattern(p, e)))
            .transpose()?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts a scan. An unreadable root fails here; problems with single
    /// entries are logged and skipped during iteration.
    pub fn scan(&self) -> HelperResult<Candidates<'_>> {
        if !self.root.is_dir() {
            return Err(HelperError::not_found(&self.root));
        }

        let root = fs::canonicalize(&self.root).map_err(|e| {
            HelperError::filesystem_error_with_source(
                format!("Cannot resolve root {}", self.root.display()),
                Some(self.root.clone()),
                e,
            )
        })?;

        // Probe readability up front; walkdir would only report it lazily.
        fs::read_dir(&root).map_err(|e| {
            HelperError::filesystem_error_with_source(
                format!("Cannot read root {}", root.display()),
                Some(root.clone()),
                e,
            )
        })?;

        // Symlinked checkouts count as directories; a dangling link surfaces
        // as an entry error.
        let entries = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        Ok(Candidates {
            enumerator: self,
            entries,
        })
    }

    fn qualifies(&self, dir: &Path) -> bool {
        self.manifests.is_project(dir) || (!self.require_manifest && dir.join(".git").exists())
    }
}

/// Lazy sequence of candidates in file-name order.
pub struct Candidates<'a> {
    enumerator: &'a RepositoryEnumerator,
    entries: walkdir::IntoIter,
}

impl Iterator for Candidates<'_> {
    type Item = RepositoryCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.into_path();
            if let Err(e) = fs::read_dir(&path) {
                warn!("Skipping unreadable directory {}: {}", path.display(), e);
                continue;
            }

            if !self.enumerator.qualifies(&path) {
                debug!("{} is not a project directory", path.display());
                continue;
            }

            if let Some(pattern) = &self.enumerator.pattern {
                if !pattern.is_match(&name) {
                    info!("Skipped {}: does not match '{}'", name, pattern.as_str());
                    continue;
                }
            }

            return Some(RepositoryCandidate { name, path });
        }
        None
    }
}
