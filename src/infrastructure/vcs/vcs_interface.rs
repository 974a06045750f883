use async_trait::async_trait;
use std::path::Path;

/// Capability surface of the version-control tool.
///
/// Every method runs in the explicit `repo` directory and returns the tool's
/// raw, untrimmed stdout. Parsing lives in the domain value objects so it can
/// be tested without spawning processes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// Update all remote-tracking refs.
    async fn fetch_all(&self, repo: &Path) -> Result<String, VcsError>;

    /// Short-form working-tree status (porcelain v1).
    async fn status_porcelain(&self, repo: &Path) -> Result<String, VcsError>;

    /// Remote listing with fetch and push URLs.
    async fn remotes(&self, repo: &Path) -> Result<String, VcsError>;

    /// Branches containing the current tip, current one starred.
    async fn branch_containing_head(&self, repo: &Path) -> Result<String, VcsError>;

    /// Most recent tag reachable from HEAD in history order.
    async fn describe_latest_tag(&self, repo: &Path) -> Result<String, VcsError>;

    /// Tags whose commit is reachable from HEAD.
    async fn merged_tags(&self, repo: &Path) -> Result<String, VcsError>;

    /// All tags.
    async fn list_tags(&self, repo: &Path) -> Result<String, VcsError>;

    /// Number of commits in `range` (e.g. `v1.0.0..HEAD`).
    async fn count_commits(&self, repo: &Path, range: &str) -> Result<String, VcsError>;

    /// Commits reachable from HEAD but from no remote-tracking ref.
    async fn count_unpushed(&self, repo: &Path) -> Result<String, VcsError>;

    /// One line per commit in `range`, newest first, at most `max_count`.
    async fn log_oneline(
        &self,
        repo: &Path,
        range: &str,
        max_count: usize,
    ) -> Result<String, VcsError>;

    async fn stage_all(&self, repo: &Path) -> Result<String, VcsError>;

    async fn commit(&self, repo: &Path, message: &str) -> Result<String, VcsError>;

    /// Porcelain status restricted to `paths`, relative to `repo`.
    async fn status_of_paths(&self, repo: &Path, paths: Vec<String>)
        -> Result<String, VcsError>;

    /// Stages `paths` and commits them alone; other staged changes stay in
    /// the index.
    async fn commit_paths(
        &self,
        repo: &Path,
        message: &str,
        paths: Vec<String>,
    ) -> Result<String, VcsError>;

    async fn create_tag(&self, repo: &Path, name: &str) -> Result<String, VcsError>;

    async fn push(&self, repo: &Path, remote: &str, refspecs: Vec<String>)
        -> Result<String, VcsError>;

    async fn pull(&self, repo: &Path) -> Result<String, VcsError>;

    /// Stash tracked and untracked changes.
    async fn stash(&self, repo: &Path) -> Result<String, VcsError>;

    async fn stash_pop(&self, repo: &Path) -> Result<String, VcsError>;
}

/// Errors raised at the subprocess boundary.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("VCS executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VcsError {
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    pub fn timeout(command: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            command: command.into(),
            timeout_secs,
        }
    }

    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
