use super::vcs_interface::{VcsClient, VcsError};
use crate::common::shell::render_command;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// `git` command-line backend.
///
/// Each invocation gets the repository as its working directory, a closed
/// stdin, no credential prompting and a wall-clock timeout. The child is
/// killed if the timeout elapses.
#[derive(Debug, Clone)]
pub struct GitCli {
    git_executable: String,
    timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.git_executable = executable.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check if the git executable can be run at all.
    pub async fn check_availability(&self) -> Result<(), VcsError> {
        let cwd = std::env::current_dir()?;
        self.run(&cwd, &["--version"]).await.map(|_| ())
    }

    async fn run(&self, repo: &Path, args: &[&str]) -> Result<String, VcsError> {
        let command = render_command(&self.git_executable, args);
        debug!("Running `{}` in {}", command, repo.display());

        let mut cmd = Command::new(&self.git_executable);
        cmd.args(args)
            .current_dir(repo)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VcsError::executable_not_found(&self.git_executable));
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(VcsError::timeout(command, self.timeout.as_secs())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::command_failed(
                command,
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn ensure_not_option(kind: &str, value: &str) -> Result<(), VcsError> {
    if value.starts_with('-') {
        return Err(VcsError::invalid_argument(format!(
            "{} '{}' must not start with '-'",
            kind, value
        )));
    }
    if value.contains('\0') {
        return Err(VcsError::invalid_argument(format!(
            "{} must not contain NUL bytes",
            kind
        )));
    }
    Ok(())
}

#[async_trait]
impl VcsClient for GitCli {
    async fn fetch_all(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["fetch", "--all", "--quiet"]).await
    }

    async fn status_porcelain(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["status", "--porcelain"]).await
    }

    async fn remotes(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["remote", "-v"]).await
    }

    async fn branch_containing_head(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["branch", "--contains", "HEAD"]).await
    }

    async fn describe_latest_tag(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["describe", "--tags", "--abbrev=0"]).await
    }

    async fn merged_tags(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["tag", "--merged", "HEAD"]).await
    }

    async fn list_tags(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["tag", "--list"]).await
    }

    async fn count_commits(&self, repo: &Path, range: &str) -> Result<String, VcsError> {
        ensure_not_option("revision range", range)?;
        self.run(repo, &["rev-list", "--count", range]).await
    }

    async fn count_unpushed(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["rev-list", "--count", "HEAD", "--not", "--remotes"])
            .await
    }

    async fn log_oneline(
        &self,
        repo: &Path,
        range: &str,
        max_count: usize,
    ) -> Result<String, VcsError> {
        ensure_not_option("revision range", range)?;
        let max_count = format!("--max-count={}", max_count);
        self.run(
            repo,
            &["log", "--oneline", "--no-decorate", &max_count, range],
        )
        .await
    }

    async fn stage_all(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["add", "--all"]).await
    }

    async fn commit(&self, repo: &Path, message: &str) -> Result<String, VcsError> {
        if message.contains('\0') {
            return Err(VcsError::invalid_argument(
                "commit message must not contain NUL bytes",
            ));
        }
        // `-m` takes the next argv entry verbatim, leading dashes included.
        self.run(repo, &["commit", "--quiet", "-m", message]).await
    }

    async fn status_of_paths(
        &self,
        repo: &Path,
        paths: Vec<String>,
    ) -> Result<String, VcsError> {
        let mut args = vec!["status", "--porcelain", "--untracked-files=all", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(repo, &args).await
    }

    async fn commit_paths(
        &self,
        repo: &Path,
        message: &str,
        paths: Vec<String>,
    ) -> Result<String, VcsError> {
        if message.contains('\0') || paths.iter().any(|p| p.contains('\0')) {
            return Err(VcsError::invalid_argument(
                "commit message and paths must not contain NUL bytes",
            ));
        }

        let mut add = vec!["add", "--"];
        add.extend(paths.iter().map(String::as_str));
        self.run(repo, &add).await?;

        // A pathspec after `--` commits only those paths, whatever else is staged.
        let mut commit = vec!["commit", "--quiet", "-m", message, "--"];
        commit.extend(paths.iter().map(String::as_str));
        self.run(repo, &commit).await
    }

    async fn create_tag(&self, repo: &Path, name: &str) -> Result<String, VcsError> {
        ensure_not_option("tag name", name)?;
        self.run(repo, &["tag", name]).await
    }

    async fn push(
        &self,
        repo: &Path,
        remote: &str,
        refspecs: Vec<String>,
    ) -> Result<String, VcsError> {
        ensure_not_option("remote", remote)?;
        for refspec in &refspecs {
            ensure_not_option("refspec", refspec)?;
        }

        let mut args = vec!["push", "--quiet", remote];
        args.extend(refspecs.iter().map(String::as_str));
        self.run(repo, &args).await
    }

    async fn pull(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["pull", "--quiet"]).await
    }

    async fn stash(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["stash", "push", "--include-untracked", "--quiet"])
            .await
    }

    async fn stash_pop(&self, repo: &Path) -> Result<String, VcsError> {
        self.run(repo, &["stash", "pop", "--quiet"]).await
    }
}
