use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;

use crate::common::error::HelperError;
use crate::common::result::HelperResult;

/// Outcome of a changelog write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The file already existed and overwriting was not requested.
    Kept(PathBuf),
}

impl WriteOutcome {
    pub fn written(&self) -> bool {
        matches!(self, WriteOutcome::Written(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(path) | WriteOutcome::Kept(path) => path,
        }
    }
}

/// Writes changelog files without clobbering existing ones by default.
#[derive(Debug, Clone, Default)]
pub struct ChangelogWriter;

impl ChangelogWriter {
    pub fn new() -> Self {
        Self
    }

    pub async fn write(
        &self,
        dir: &Path,
        file_name: &str,
        contents: &str,
        overwrite: bool,
    ) -> HelperResult<WriteOutcome> {
        let target = dir.join(file_name);

        if async_fs::try_exists(&target).await.unwrap_or(false) && !overwrite {
            debug!("Keeping existing changelog {}", target.display());
            return Ok(WriteOutcome::Kept(target));
        }

        async_fs::create_dir_all(dir).await.map_err(|e| {
            HelperError::filesystem_error_with_source(
                format!("Failed to create changelog directory {}", dir.display()),
                Some(dir.to_path_buf()),
                e,
            )
        })?;

        async_fs::write(&target, contents).await.map_err(|e| {
            HelperError::filesystem_error_with_source(
                format!("Failed to write changelog {}", target.display()),
                Some(target.clone()),
                e,
            )
        })?;

        debug!("Wrote changelog {}", target.display());
        Ok(WriteOutcome::Written(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("changelogs");
        let outcome = ChangelogWriter::new()
            .write(&out, "v1.0.0..v1.1.0", "a1 fix\r\n", false)
            .await
            .unwrap();

        assert!(outcome.written());
        assert_eq!(std::fs::read_to_string(outcome.path()).unwrap(), "a1 fix\r\n");
    }

    #[tokio::test]
    async fn test_existing_file_is_kept_unless_overwrite() {
        let dir = TempDir::new().unwrap();
        let writer = ChangelogWriter::new();
        std::fs::write(dir.path().join("a..b"), "old").unwrap();

        let kept = writer.write(dir.path(), "a..b", "new", false).await.unwrap();
        assert!(!kept.written());
        assert_eq!(std::fs::read_to_string(dir.path().join("a..b")).unwrap(), "old");

        let written = writer.write(dir.path(), "a..b", "new", true).await.unwrap();
        assert!(written.written());
        assert_eq!(std::fs::read_to_string(dir.path().join("a..b")).unwrap(), "new");
    }
}
