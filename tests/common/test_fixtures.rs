//! Test fixtures for package roots
//!
//! A `PackageRoot` is a temporary directory holding project checkouts, the
//! layout every command operates on.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

use git_helpers::application::use_cases::runner::RunContext;
use git_helpers::domain::entities::helper_config::HelperConfig;
use git_helpers::infrastructure::vcs::VcsClient;

pub struct PackageRoot {
    dir: TempDir,
}

impl PackageRoot {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp root"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A project directory with a `composer.json` naming it `acme/<dir>`.
    pub fn add_package(&self, dir: &str) -> PathBuf {
        let path = self.dir.path().join(dir);
        fs::create_dir_all(&path).expect("Failed to create package dir");
        fs::write(
            path.join("composer.json"),
            format!(r#"{{"name": "acme/{}", "license": "MIT"}}"#, dir),
        )
        .expect("Failed to write composer.json");
        path
    }

    /// A directory no manifest marks as a project.
    pub fn add_plain_dir(&self, dir: &str) -> PathBuf {
        let path = self.dir.path().join(dir);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    pub fn context(&self, vcs: Arc<dyn VcsClient>) -> Arc<RunContext> {
        Arc::new(RunContext::new(self.path(), HelperConfig::default(), vcs))
    }
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Runs git in `dir` and returns trimmed stdout, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A checkout cloned from a fresh bare remote, with one initial commit on
/// `main` already pushed.
pub struct GitPackage {
    pub remote: PathBuf,
    pub checkout: PathBuf,
}

impl GitPackage {
    pub fn create(root: &PackageRoot, remotes_dir: &Path, name: &str) -> Self {
        let remote = remotes_dir.join(format!("{}.git", name));
        fs::create_dir_all(&remote).expect("Failed to create remote dir");
        git(&remote, &["init", "--bare", "--quiet"]);
        git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);

        let checkout = root.path().join(name);
        git(
            root.path(),
            &["clone", "--quiet", remote.to_str().expect("utf-8 path"), name],
        );
        git(&checkout, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(&checkout, &["config", "user.name", "Test User"]);
        git(&checkout, &["config", "user.email", "test@example.com"]);
        git(&checkout, &["config", "commit.gpgsign", "false"]);
        git(&checkout, &["config", "tag.gpgsign", "false"]);

        fs::write(
            checkout.join("composer.json"),
            format!(r#"{{"name": "acme/{}"}}"#, name),
        )
        .expect("Failed to write composer.json");
        git(&checkout, &["add", "--all"]);
        git(&checkout, &["commit", "--quiet", "-m", "Initial commit"]);
        git(&checkout, &["push", "--quiet", "origin", "main"]);

        Self { remote, checkout }
    }

    /// Adds a file and commits it with `message`.
    pub fn commit_file(&self, file: &str, message: &str) {
        fs::write(self.checkout.join(file), message).expect("Failed to write file");
        git(&self.checkout, &["add", "--all"]);
        git(&self.checkout, &["commit", "--quiet", "-m", message]);
    }

    pub fn tag(&self, tag: &str) {
        git(&self.checkout, &["tag", tag]);
    }

    pub fn remote_tags(&self) -> Vec<String> {
        git(&self.remote, &["tag", "--list"])
            .lines()
            .map(str::to_string)
            .collect()
    }
}
