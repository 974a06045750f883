use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::common::result::HelperResult;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 180;
pub const DEFAULT_CHANGELOG_DIR: &str = "changelogs";

fn default_manifest_files() -> Vec<String> {
    vec![
        "composer.json".to_string(),
        "package.json".to_string(),
        "Cargo.toml".to_string(),
    ]
}

fn default_strict_manifest() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_jobs() -> usize {
    1
}

fn default_changelog_dir() -> String {
    DEFAULT_CHANGELOG_DIR.to_string()
}

fn default_git_executable() -> String {
    "git".to_string()
}

/// Resolved settings shared by every operation.
///
/// Loaded from `<root>/.git-helpers.yml` when present, then overridden by
/// command-line flags and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct HelperConfig {
    /// File names that mark a directory as a project.
    #[serde(default = "default_manifest_files")]
    #[validate(length(min = 1))]
    pub manifest_files: Vec<String>,

    /// Fail with `NotAProject` when no manifest is present.
    #[serde(default = "default_strict_manifest")]
    pub strict_manifest: bool,

    /// Per-subprocess wall-clock limit.
    #[serde(default = "default_timeout_seconds")]
    #[validate(range(min = 1, max = 3600))]
    pub timeout_seconds: u64,

    /// Repositories processed concurrently.
    #[serde(default = "default_jobs")]
    #[validate(range(min = 1, max = 64))]
    pub jobs: usize,

    #[serde(default = "default_changelog_dir")]
    #[validate(length(min = 1))]
    pub changelog_dir: String,

    #[serde(default = "default_git_executable")]
    #[validate(length(min = 1))]
    pub git_executable: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            manifest_files: default_manifest_files(),
            strict_manifest: default_strict_manifest(),
            timeout_seconds: default_timeout_seconds(),
            jobs: default_jobs(),
            changelog_dir: default_changelog_dir(),
            git_executable: default_git_executable(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub timeout_seconds: Option<u64>,
    pub jobs: Option<usize>,
    pub strict_manifest: Option<bool>,
}

impl HelperConfig {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(timeout) = overrides.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(jobs) = overrides.jobs {
            self.jobs = jobs;
        }
        if let Some(strict) = overrides.strict_manifest {
            self.strict_manifest = strict;
        }
        self
    }

    /// Validates and returns the record unchanged.
    pub fn validated(self) -> HelperResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
