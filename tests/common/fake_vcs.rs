//! Scripted in-memory version-control client
//!
//! `FakeVcs` answers every `VcsClient` call from a per-repository script,
//! keyed by directory name, and records each call so tests can assert on
//! what an orchestrator did.

use async_trait::async_trait;
use git_helpers::infrastructure::vcs::{VcsClient, VcsError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Scripted state of one repository.
#[derive(Debug, Clone)]
pub struct RepoScript {
    pub status: String,
    pub remotes: String,
    pub branch: String,
    pub describe: Option<String>,
    pub merged_tags: String,
    pub tags: String,
    /// Commit counts by range; unknown ranges count zero.
    pub counts: HashMap<String, usize>,
    pub log: String,
    pub unpushed: usize,
    pub pull_fails: bool,
    stashed: Option<String>,
}

impl Default for RepoScript {
    fn default() -> Self {
        Self {
            status: String::new(),
            remotes: "origin\tgit@example.com:acme/pkg.git (fetch)\n\
                      origin\tgit@example.com:acme/pkg.git (push)\n"
                .to_string(),
            branch: "* main\n".to_string(),
            describe: None,
            merged_tags: String::new(),
            tags: String::new(),
            counts: HashMap::new(),
            log: String::new(),
            unpushed: 0,
            pull_fails: false,
            stashed: None,
        }
    }
}

impl RepoScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn without_remotes(mut self) -> Self {
        self.remotes = String::new();
        self
    }

    /// Tags in creation order; the last one is also what `describe` reports.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        let listing: String = tags.iter().map(|t| format!("{}\n", t)).collect();
        self.tags = listing.clone();
        self.merged_tags = listing;
        self.describe = tags.last().map(|t| t.to_string());
        self
    }

    /// Tags that exist but are not reachable from HEAD.
    pub fn with_unmerged_tags(mut self, tags: &[&str]) -> Self {
        for tag in tags {
            self.tags.push_str(&format!("{}\n", tag));
        }
        self
    }

    pub fn with_count(mut self, range: &str, count: usize) -> Self {
        self.counts.insert(range.to_string(), count);
        self
    }

    pub fn with_log(mut self, lines: &[&str]) -> Self {
        self.log = lines.iter().map(|l| format!("{}\n", l)).collect();
        self
    }

    pub fn with_unpushed(mut self, count: usize) -> Self {
        self.unpushed = count;
        self
    }

    pub fn failing_pull(mut self) -> Self {
        self.pull_fails = true;
        self
    }
}

#[derive(Default)]
pub struct FakeVcs {
    scripts: Mutex<HashMap<String, RepoScript>>,
    calls: Mutex<Vec<String>>,
    /// Contents of files committed through `commit_paths`.
    committed: Mutex<HashMap<PathBuf, String>>,
}

impl FakeVcs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, repo: &str, script: RepoScript) {
        self.scripts.lock().unwrap().insert(repo.to_string(), script);
    }

    /// Every call as `repo:method(args)`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made for `repo`, without the repository prefix.
    pub fn calls_for(&self, repo: &str) -> Vec<String> {
        let prefix = format!("{}:", repo);
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn called(&self, repo: &str, method: &str) -> bool {
        self.calls_for(repo).iter().any(|c| c.starts_with(method))
    }

    pub fn status_of(&self, repo: &str) -> String {
        self.scripts
            .lock()
            .unwrap()
            .get(repo)
            .map(|s| s.status.clone())
            .unwrap_or_default()
    }

    fn record(&self, repo: &Path, call: String) -> String {
        let name = repo_name(repo);
        self.calls.lock().unwrap().push(format!("{}:{}", name, call));
        name
    }

    fn with_script<T>(&self, name: &str, f: impl FnOnce(&mut RepoScript) -> T) -> T {
        let mut scripts = self.scripts.lock().unwrap();
        f(scripts.entry(name.to_string()).or_default())
    }
}

fn repo_name(repo: &Path) -> String {
    repo.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl VcsClient for FakeVcs {
    async fn fetch_all(&self, repo: &Path) -> Result<String, VcsError> {
        self.record(repo, "fetch_all()".to_string());
        Ok(String::new())
    }

    async fn status_porcelain(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "status_porcelain()".to_string());
        Ok(self.with_script(&name, |s| s.status.clone()))
    }

    async fn remotes(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "remotes()".to_string());
        Ok(self.with_script(&name, |s| s.remotes.clone()))
    }

    async fn branch_containing_head(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "branch_containing_head()".to_string());
        Ok(self.with_script(&name, |s| s.branch.clone()))
    }

    async fn describe_latest_tag(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "describe_latest_tag()".to_string());
        self.with_script(&name, |s| s.describe.clone())
            .map(|tag| format!("{}\n", tag))
            .ok_or_else(|| {
                VcsError::command_failed("git describe --tags --abbrev=0", 128, "No names found")
            })
    }

    async fn merged_tags(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "merged_tags()".to_string());
        Ok(self.with_script(&name, |s| s.merged_tags.clone()))
    }

    async fn list_tags(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "list_tags()".to_string());
        Ok(self.with_script(&name, |s| s.tags.clone()))
    }

    async fn count_commits(&self, repo: &Path, range: &str) -> Result<String, VcsError> {
        let name = self.record(repo, format!("count_commits({})", range));
        let count = self.with_script(&name, |s| s.counts.get(range).copied().unwrap_or(0));
        Ok(format!("{}\n", count))
    }

    async fn count_unpushed(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "count_unpushed()".to_string());
        Ok(format!("{}\n", self.with_script(&name, |s| s.unpushed)))
    }

    async fn log_oneline(
        &self,
        repo: &Path,
        range: &str,
        max_count: usize,
    ) -> Result<String, VcsError> {
        let name = self.record(repo, format!("log_oneline({}, {})", range, max_count));
        Ok(self.with_script(&name, |s| s.log.clone()))
    }

    async fn stage_all(&self, repo: &Path) -> Result<String, VcsError> {
        self.record(repo, "stage_all()".to_string());
        Ok(String::new())
    }

    async fn commit(&self, repo: &Path, message: &str) -> Result<String, VcsError> {
        let name = self.record(repo, format!("commit({})", message));
        self.with_script(&name, |s| s.status.clear());
        Ok(String::new())
    }

    /// Reports a path as untracked while its contents on disk differ from
    /// what was last committed.
    async fn status_of_paths(
        &self,
        repo: &Path,
        paths: Vec<String>,
    ) -> Result<String, VcsError> {
        self.record(repo, format!("status_of_paths({})", paths.join(" ")));
        let committed = self.committed.lock().unwrap();
        Ok(paths
            .iter()
            .filter(|path| {
                let full = repo.join(path);
                match std::fs::read_to_string(&full) {
                    Ok(contents) => committed.get(&full) != Some(&contents),
                    Err(_) => false,
                }
            })
            .map(|path| format!("?? {}\n", path))
            .collect())
    }

    async fn commit_paths(
        &self,
        repo: &Path,
        message: &str,
        paths: Vec<String>,
    ) -> Result<String, VcsError> {
        self.record(repo, format!("commit_paths({} -- {})", message, paths.join(" ")));
        let mut committed = self.committed.lock().unwrap();
        for path in &paths {
            let full = repo.join(path);
            if let Ok(contents) = std::fs::read_to_string(&full) {
                committed.insert(full, contents);
            }
        }
        Ok(String::new())
    }

    async fn create_tag(&self, repo: &Path, tag: &str) -> Result<String, VcsError> {
        let name = self.record(repo, format!("create_tag({})", tag));
        self.with_script(&name, |s| {
            s.tags.push_str(&format!("{}\n", tag));
            s.merged_tags.push_str(&format!("{}\n", tag));
            s.describe = Some(tag.to_string());
        });
        Ok(String::new())
    }

    async fn push(
        &self,
        repo: &Path,
        remote: &str,
        refspecs: Vec<String>,
    ) -> Result<String, VcsError> {
        self.record(repo, format!("push({} {})", remote, refspecs.join(" ")));
        Ok(String::new())
    }

    async fn pull(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "pull()".to_string());
        if self.with_script(&name, |s| s.pull_fails) {
            return Err(VcsError::command_failed(
                "git pull --quiet",
                1,
                "fatal: Could not read from remote repository.",
            ));
        }
        Ok(String::new())
    }

    async fn stash(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "stash()".to_string());
        self.with_script(&name, |s| s.stashed = Some(std::mem::take(&mut s.status)));
        Ok(String::new())
    }

    async fn stash_pop(&self, repo: &Path) -> Result<String, VcsError> {
        let name = self.record(repo, "stash_pop()".to_string());
        self.with_script(&name, |s| {
            if let Some(status) = s.stashed.take() {
                s.status = status;
            }
        });
        Ok(String::new())
    }
}
