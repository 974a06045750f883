use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::error::HelperError;
use crate::common::result::HelperResult;
use crate::domain::entities::helper_config::HelperConfig;

pub const CONFIG_FILE_NAME: &str = ".git-helpers.yml";

/// Optional per-root configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(CONFIG_FILE_NAME),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the file, or returns defaults when it does not exist.
    pub fn load(&self) -> HelperResult<HelperConfig> {
        if !self.exists() {
            debug!("No {} found, using defaults", self.path.display());
            return Ok(HelperConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            HelperError::filesystem_error_with_source(
                format!("Failed to read config file {}", self.path.display()),
                Some(self.path.clone()),
                e,
            )
        })?;

        if content.trim().is_empty() {
            return Ok(HelperConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            HelperError::config_error_with_source(
                format!("Invalid configuration in {}", self.path.display()),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), HelperConfig::default());
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "jobs: 4\nchangelog_dir: docs/changes\n",
        )
        .unwrap();

        let config = ConfigStore::new(dir.path()).load().unwrap();
        assert_eq!(
            config,
            HelperConfig {
                jobs: 4,
                changelog_dir: "docs/changes".to_string(),
                ..HelperConfig::default()
            }
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "jobs: [unclosed").unwrap();
        let error = ConfigStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(error, HelperError::ConfigError { .. }));
    }
}
