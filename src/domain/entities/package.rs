//! Per-repository state accessor.
//!
//! A [`Package`] is opened fresh for every operation on a directory. Opening
//! fetches from the remotes once and derives remote identity, branch and
//! latest tag; later mutations do not refresh those fields.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::common::error::HelperError;
use crate::common::result::{HelperResult, OptionExt};
use crate::common::shell::{check_message, check_ref_label};
use crate::domain::entities::helper_config::HelperConfig;
use crate::domain::entities::manifest::ProjectManifest;
use crate::domain::value_objects::branch::parse_current_branch;
use crate::domain::value_objects::{
    compare_tags, ChangeSet, DirtyState, RemoteInfo, RemoteSet, SortDirection, TagSequence,
    Version,
};
use crate::infrastructure::filesystem::{ChangelogWriter, ManifestStore};
use crate::infrastructure::vcs::{VcsClient, VcsError};

/// How a directory is recognised as a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOptions {
    pub manifest_files: Vec<String>,
    /// Fail with `NotAProject` instead of using an empty manifest.
    pub strict_manifest: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self::from(&HelperConfig::default())
    }
}

impl From<&HelperConfig> for PackageOptions {
    fn from(config: &HelperConfig) -> Self {
        Self {
            manifest_files: config.manifest_files.clone(),
            strict_manifest: config.strict_manifest,
        }
    }
}

pub struct Package {
    path: PathBuf,
    manifest: ProjectManifest,
    remote: Option<RemoteInfo>,
    branch: Option<String>,
    latest_tag: Option<String>,
    vcs: Arc<dyn VcsClient>,
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("path", &self.path)
            .field("name", &self.name())
            .field("remote", &self.remote)
            .field("branch", &self.branch)
            .field("latest_tag", &self.latest_tag)
            .finish_non_exhaustive()
    }
}

impl Package {
    /// Opens the checkout at `path` and derives its state.
    ///
    /// A failed fetch is logged and tolerated so offline checkouts still
    /// report local state. A fetch that hits the subprocess timeout aborts
    /// the open, since every later network call would stall the same way.
    pub async fn open(
        path: impl Into<PathBuf>,
        vcs: Arc<dyn VcsClient>,
        options: &PackageOptions,
    ) -> HelperResult<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(HelperError::not_found(path));
        }

        let store = ManifestStore::new(options.manifest_files.clone());
        let manifest = match store.load(&path).await? {
            Some(manifest) => manifest,
            None if options.strict_manifest => {
                return Err(HelperError::not_a_project(&path, &options.manifest_files));
            }
            None => ProjectManifest::empty(),
        };

        match vcs.fetch_all(&path).await {
            Ok(_) => {}
            Err(e @ VcsError::Timeout { .. }) => return Err(e.into()),
            Err(e) => warn!("Fetch failed in {}: {}", path.display(), e),
        }

        let remote = match vcs.remotes(&path).await {
            Ok(output) => RemoteSet::parse(&output).select().cloned(),
            Err(e) => {
                warn!("Could not list remotes in {}: {}", path.display(), e);
                None
            }
        };

        let branch = match vcs.branch_containing_head(&path).await {
            Ok(output) => parse_current_branch(&output),
            Err(e) => {
                warn!("Could not determine branch in {}: {}", path.display(), e);
                None
            }
        };

        let latest_tag = resolve_latest_tag(&path, vcs.as_ref()).await;

        Ok(Self {
            path,
            manifest,
            remote,
            branch,
            latest_tag,
            vcs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Manifest name, or the directory name when the manifest has none.
    pub fn name(&self) -> String {
        self.manifest.name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string())
        })
    }

    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    pub fn remote(&self) -> Option<&RemoteInfo> {
        self.remote.as_ref()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn latest_tag(&self) -> Option<&str> {
        self.latest_tag.as_deref()
    }

    /// Uncommitted changes by category, read fresh on every call.
    pub async fn dirty_state(&self) -> HelperResult<DirtyState> {
        let output = self.vcs.status_porcelain(&self.path).await?;
        Ok(DirtyState::from_porcelain(&output))
    }

    /// Commits on HEAD that no remote-tracking ref contains.
    pub async fn unpushed_commit_count(&self) -> Option<usize> {
        match self.vcs.count_unpushed(&self.path).await {
            Ok(output) => parse_count(&output),
            Err(e) => {
                warn!("Could not count unpushed commits in {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Number of commits in `from..to`.
    ///
    /// `from` defaults to the latest tag. `None` means there was no start
    /// to count from, or the count could not be read.
    pub async fn changes_since(&self, from: Option<&str>, to: &str) -> Option<usize> {
        let from = from.or(self.latest_tag.as_deref())?;
        match self.count_range(from, to).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("Could not count {}..{} in {}: {}", from, to, self.path.display(), e);
                None
            }
        }
    }

    /// One-line descriptors for `from..to`, newest first, capped to the
    /// commit count of that range.
    pub async fn changes_between(&self, from: Option<&str>, to: &str) -> Option<ChangeSet> {
        let from = from.or(self.latest_tag.as_deref())?;
        match self.change_list(from, to).await {
            Ok(changes) => Some(changes),
            Err(e) => {
                warn!("Could not list {}..{} in {}: {}", from, to, self.path.display(), e);
                None
            }
        }
    }

    /// All tags in semantic-version order. Empty when listing fails.
    pub async fn tags(&self, direction: SortDirection) -> TagSequence {
        match self.vcs.list_tags(&self.path).await {
            Ok(output) => TagSequence::from_listing(&output, direction),
            Err(e) => {
                warn!("Could not list tags in {}: {}", self.path.display(), e);
                TagSequence::new(Vec::new(), direction)
            }
        }
    }

    /// Tags HEAD as `version` and pushes the branch and the tag.
    ///
    /// The local tag is kept when publishing fails; that case surfaces as
    /// `TagPublishFailed`.
    pub async fn add_tag(&self, version: &str) -> HelperResult<()> {
        check_ref_label("version", version)?;
        self.vcs.create_tag(&self.path, version).await?;

        let remote = self
            .remote
            .as_ref()
            .filter(|r| r.is_pushable())
            .ok_or_helper(HelperError::tag_publish_failed(
                version,
                "no pushable remote configured",
            ))?;

        let mut refspecs = Vec::with_capacity(2);
        if let Some(branch) = &self.branch {
            refspecs.push(branch.clone());
        }
        refspecs.push(format!("refs/tags/{}", version));

        self.vcs
            .push(&self.path, &remote.name, refspecs)
            .await
            .map_err(|e| HelperError::tag_publish_failed(version, e))?;

        debug!("Published {} to {}", version, remote.name);
        Ok(())
    }

    /// Stages everything (new files included) and commits.
    pub async fn commit(&self, message: &str) -> HelperResult<()> {
        check_message("message", message)?;
        self.vcs.stage_all(&self.path).await?;
        self.vcs.commit(&self.path, message).await?;
        Ok(())
    }

    /// Commits the changelog at `path` on its own, leaving any other local
    /// changes out of the commit.
    ///
    /// Returns `false` when the file has nothing to commit, or lies outside
    /// the checkout.
    pub async fn commit_changelog(&self, message: &str, path: &Path) -> HelperResult<bool> {
        check_message("message", message)?;
        let Ok(relative) = path.strip_prefix(&self.path) else {
            warn!(
                "{}: {} is outside the checkout, not committing it",
                self.name(),
                path.display()
            );
            return Ok(false);
        };
        let paths = vec![relative.to_string_lossy().into_owned()];

        let status = self.vcs.status_of_paths(&self.path, paths.clone()).await?;
        if status.trim().is_empty() {
            return Ok(false);
        }
        self.vcs.commit_paths(&self.path, message, paths).await?;
        Ok(true)
    }

    pub async fn pull(&self) -> HelperResult<()> {
        self.vcs.pull(&self.path).await?;
        Ok(())
    }

    pub async fn stash_changes(&self) -> HelperResult<()> {
        self.vcs.stash(&self.path).await?;
        Ok(())
    }

    /// Pops the stash. Only valid after [`Package::stash_changes`].
    pub async fn restore_changes(&self) -> HelperResult<()> {
        self.vcs.stash_pop(&self.path).await?;
        Ok(())
    }

    /// Where a changelog for `from..label` lands. Relative directories
    /// resolve inside the checkout.
    pub fn changelog_path(&self, output_dir: &Path, from: &str, label: &str) -> PathBuf {
        self.resolve_dir(output_dir).join(changelog_file_name(from, label))
    }

    /// Writes the descriptors of `from..to` to `<output_dir>/<from>..<label>`,
    /// `label` being `alias` or `to`.
    ///
    /// Returns `false` without writing when the file exists and `force` is
    /// not set.
    pub async fn generate_changelog(
        &self,
        output_dir: &Path,
        from: &str,
        to: &str,
        alias: Option<&str>,
        force: bool,
    ) -> HelperResult<bool> {
        let label = alias.unwrap_or(to);
        check_ref_label("from", from)?;
        check_ref_label("label", label)?;

        let dir = self.resolve_dir(output_dir);
        let file_name = changelog_file_name(from, label);
        if !force && dir.join(&file_name).exists() {
            return Ok(false);
        }

        let changes = self.change_list(from, to).await?;
        let outcome = ChangelogWriter::new()
            .write(&dir, &file_name, &changes.to_changelog(), force)
            .await?;
        Ok(outcome.written())
    }

    fn resolve_dir(&self, output_dir: &Path) -> PathBuf {
        if output_dir.is_absolute() {
            output_dir.to_path_buf()
        } else {
            self.path.join(output_dir)
        }
    }

    async fn count_range(&self, from: &str, to: &str) -> HelperResult<usize> {
        let range = format!("{}..{}", from, to);
        let output = self.vcs.count_commits(&self.path, &range).await?;
        parse_count(&output).ok_or_else(|| {
            HelperError::internal_error(format!(
                "unexpected commit count output for {}: {:?}",
                range, output
            ))
        })
    }

    async fn change_list(&self, from: &str, to: &str) -> HelperResult<ChangeSet> {
        let count = self.count_range(from, to).await?;
        if count == 0 {
            return Ok(ChangeSet::default());
        }

        let range = format!("{}..{}", from, to);
        let output = self.vcs.log_oneline(&self.path, &range, count).await?;
        Ok(ChangeSet::from_log(&output, count))
    }
}

fn changelog_file_name(from: &str, label: &str) -> String {
    format!("{}..{}", from, label)
}

fn parse_count(output: &str) -> Option<usize> {
    output.trim().parse().ok()
}

/// Latest tag by version order among tags merged into HEAD, checked against
/// the history-order answer from `describe`.
async fn resolve_latest_tag(path: &Path, vcs: &dyn VcsClient) -> Option<String> {
    let by_history = match vcs.describe_latest_tag(path).await {
        Ok(output) => Some(output.trim().to_string()).filter(|t| Version::parse(t).is_some()),
        Err(e) => {
            debug!("No describable tag in {}: {}", path.display(), e);
            None
        }
    };

    let by_version = match vcs.merged_tags(path).await {
        Ok(output) => TagSequence::from_listing(&output, SortDirection::Asc)
            .highest_version()
            .map(str::to_string),
        Err(e) => {
            warn!("Could not list merged tags in {}: {}", path.display(), e);
            None
        }
    };

    match (by_history, by_version) {
        (Some(history_tag), Some(version_tag)) if history_tag != version_tag => {
            let chosen = match compare_tags(&history_tag, &version_tag) {
                Ordering::Greater => history_tag.clone(),
                _ => version_tag.clone(),
            };
            warn!(
                "{}",
                HelperError::AmbiguousTagResolution {
                    path: path.to_path_buf(),
                    history_tag,
                    version_tag,
                    chosen: chosen.clone(),
                }
            );
            Some(chosen)
        }
        (history_tag, version_tag) => version_tag.or(history_tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::vcs::MockVcsClient;
    use std::fs;
    use tempfile::TempDir;

    const ORIGIN: &str = "origin\tgit@example.com:acme/pkg.git (fetch)\n\
                          origin\tgit@example.com:acme/pkg.git (push)\n";

    fn project_dir(manifest: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        if let Some(contents) = manifest {
            fs::write(dir.path().join("composer.json"), contents).unwrap();
        }
        dir
    }

    fn opening_mock(
        remotes: &'static str,
        describe: Option<&'static str>,
        merged: &'static str,
    ) -> MockVcsClient {
        let mut vcs = MockVcsClient::new();
        vcs.expect_fetch_all().returning(|_| Ok(String::new()));
        vcs.expect_remotes().returning(move |_| Ok(remotes.to_string()));
        vcs.expect_branch_containing_head()
            .returning(|_| Ok("* main\n".to_string()));
        vcs.expect_describe_latest_tag().returning(move |_| match describe {
            Some(tag) => Ok(format!("{}\n", tag)),
            None => Err(VcsError::command_failed("git describe", 128, "No names found")),
        });
        vcs.expect_merged_tags()
            .returning(move |_| Ok(merged.to_string()));
        vcs
    }

    async fn open(dir: &TempDir, vcs: MockVcsClient) -> HelperResult<Package> {
        Package::open(dir.path(), Arc::new(vcs), &PackageOptions::default()).await
    }

    #[tokio::test]
    async fn test_open_missing_directory() {
        let result = Package::open(
            "/nonexistent/git-helpers/pkg",
            Arc::new(MockVcsClient::new()),
            &PackageOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(HelperError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_open_without_manifest() {
        let dir = project_dir(None);
        let result = open(&dir, MockVcsClient::new()).await;
        assert!(matches!(result, Err(HelperError::NotAProject { .. })));

        let lenient = PackageOptions {
            strict_manifest: false,
            ..PackageOptions::default()
        };
        let package = Package::open(dir.path(), Arc::new(opening_mock("", None, "")), &lenient)
            .await
            .unwrap();
        assert!(package.manifest().is_empty());
    }

    #[tokio::test]
    async fn test_open_derives_state() {
        let dir = project_dir(Some(r#"{"name": "acme/pkg"}"#));
        let package = open(&dir, opening_mock(ORIGIN, Some("v1.1.0"), "v1.0.0\nv1.1.0\n"))
            .await
            .unwrap();

        assert_eq!(package.name(), "acme/pkg");
        assert_eq!(package.branch(), Some("main"));
        assert_eq!(package.latest_tag(), Some("v1.1.0"));
        let remote = package.remote().unwrap();
        assert_eq!(remote.name, "origin");
        assert!(remote.is_fetchable() && remote.is_pushable());
    }

    #[tokio::test]
    async fn test_name_falls_back_to_directory() {
        let dir = project_dir(Some("{}"));
        let package = open(&dir, opening_mock("", None, "")).await.unwrap();
        let expected = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(package.name(), expected);
        assert!(package.remote().is_none());
        assert!(package.latest_tag().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_tolerated() {
        let dir = project_dir(Some("{}"));
        let mut vcs = MockVcsClient::new();
        vcs.expect_fetch_all()
            .returning(|_| Err(VcsError::command_failed("git fetch --all", 1, "offline")));
        vcs.expect_remotes().returning(|_| Ok(String::new()));
        vcs.expect_branch_containing_head()
            .returning(|_| Ok("* main\n".to_string()));
        vcs.expect_describe_latest_tag()
            .returning(|_| Ok("v0.1.0\n".to_string()));
        vcs.expect_merged_tags().returning(|_| Ok("v0.1.0\n".to_string()));

        let package = open(&dir, vcs).await.unwrap();
        assert_eq!(package.latest_tag(), Some("v0.1.0"));
    }

    #[tokio::test]
    async fn test_fetch_timeout_aborts() {
        let dir = project_dir(Some("{}"));
        let mut vcs = MockVcsClient::new();
        vcs.expect_fetch_all()
            .returning(|_| Err(VcsError::timeout("git fetch --all", 1)));

        let error = open(&dir, vcs).await.unwrap_err();
        assert!(error.is_timeout());
    }

    #[tokio::test]
    async fn test_latest_tag_prefers_higher_version() {
        let dir = project_dir(Some("{}"));
        // describe sees a back-ported patch tag; version order wins.
        let package = open(&dir, opening_mock("", Some("v1.0.5"), "v1.0.5\nv1.2.0\nv1.0.0\n"))
            .await
            .unwrap();
        assert_eq!(package.latest_tag(), Some("v1.2.0"));
    }

    #[tokio::test]
    async fn test_latest_tag_ignores_non_version_tags() {
        let dir = project_dir(Some("{}"));
        let package = open(&dir, opening_mock("", Some("nightly"), "nightly\nv2.0.0\n"))
            .await
            .unwrap();
        assert_eq!(package.latest_tag(), Some("v2.0.0"));
    }

    #[tokio::test]
    async fn test_changes_since_without_tag_is_absent() {
        let dir = project_dir(Some("{}"));
        let package = open(&dir, opening_mock("", None, "")).await.unwrap();
        assert_eq!(package.changes_since(None, "HEAD").await, None);
        assert!(package.changes_between(None, "HEAD").await.is_none());
    }

    #[tokio::test]
    async fn test_changes_between_caps_listing() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, Some("v1.1.0"), "v1.1.0\n");
        vcs.expect_count_commits()
            .withf(|_, range| range == "v1.1.0..HEAD")
            .returning(|_, _| Ok("2\n".to_string()));
        vcs.expect_log_oneline()
            .withf(|_, range, max| range == "v1.1.0..HEAD" && *max == 2)
            .returning(|_, _, _| Ok("c3 third\nc2 second\n".to_string()));

        let package = open(&dir, vcs).await.unwrap();
        assert_eq!(package.changes_since(None, "HEAD").await, Some(2));
        let changes = package.changes_between(None, "HEAD").await.unwrap();
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec!["c3 third", "c2 second"]);
    }

    #[tokio::test]
    async fn test_add_tag_pushes_branch_and_tag() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, Some("v1.1.0"), "v1.1.0\n");
        vcs.expect_create_tag()
            .withf(|_, name| name == "v1.1.1")
            .times(1)
            .returning(|_, _| Ok(String::new()));
        vcs.expect_push()
            .withf(|_, remote, refs| {
                remote == "origin"
                    && refs == &vec!["main".to_string(), "refs/tags/v1.1.1".to_string()]
            })
            .times(1)
            .returning(|_, _, _| Ok(String::new()));

        let package = open(&dir, vcs).await.unwrap();
        package.add_tag("v1.1.1").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_tag_reports_failed_push() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, None, "");
        vcs.expect_create_tag().times(1).returning(|_, _| Ok(String::new()));
        vcs.expect_push()
            .returning(|_, _, _| Err(VcsError::command_failed("git push", 1, "rejected")));

        let package = open(&dir, vcs).await.unwrap();
        let error = package.add_tag("v0.1.0").await.unwrap_err();
        assert!(matches!(error, HelperError::TagPublishFailed { .. }));
    }

    #[tokio::test]
    async fn test_add_tag_rejects_option_like_version() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, None, "");
        vcs.expect_create_tag().never();

        let package = open(&dir, vcs).await.unwrap();
        let error = package.add_tag("--delete").await.unwrap_err();
        assert!(matches!(error, HelperError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_commit_passes_message_verbatim() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, None, "");
        vcs.expect_stage_all().times(1).returning(|_| Ok(String::new()));
        vcs.expect_commit()
            .withf(|_, message| message == "Fix \"quoted\" $(whoami) bug")
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let package = open(&dir, vcs).await.unwrap();
        package.commit("Fix \"quoted\" $(whoami) bug").await.unwrap();
        assert!(package.commit("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_generate_changelog_respects_force() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, Some("v1.1.0"), "v1.0.0\nv1.1.0\n");
        vcs.expect_count_commits().returning(|_, _| Ok("1\n".to_string()));
        vcs.expect_log_oneline()
            .returning(|_, _, _| Ok("a1 first change\n".to_string()));

        let package = open(&dir, vcs).await.unwrap();
        let out = Path::new("changelogs");
        let target = package.changelog_path(out, "v1.0.0", "v1.1.0");

        assert!(package
            .generate_changelog(out, "v1.0.0", "v1.1.0", None, false)
            .await
            .unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "a1 first change\r\n");

        fs::write(&target, "edited by hand").unwrap();
        assert!(!package
            .generate_changelog(out, "v1.0.0", "v1.1.0", None, false)
            .await
            .unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "edited by hand");

        assert!(package
            .generate_changelog(out, "v1.0.0", "v1.1.0", None, true)
            .await
            .unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "a1 first change\r\n");
    }

    #[tokio::test]
    async fn test_commit_changelog_commits_only_that_file() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, Some("v1.1.0"), "v1.1.0\n");
        vcs.expect_status_of_paths()
            .withf(|_, paths| paths == &vec!["changelogs/v1.1.0..v1.2.0".to_string()])
            .returning(|_, _| Ok("?? changelogs/v1.1.0..v1.2.0\n".to_string()));
        vcs.expect_stage_all().never();
        vcs.expect_commit_paths()
            .withf(|_, message, paths| {
                message == "Auto-generated changelog for v1.2.0."
                    && paths == &vec!["changelogs/v1.1.0..v1.2.0".to_string()]
            })
            .times(1)
            .returning(|_, _, _| Ok(String::new()));

        let package = open(&dir, vcs).await.unwrap();
        let target = package.changelog_path(Path::new("changelogs"), "v1.1.0", "v1.2.0");
        assert!(package
            .commit_changelog("Auto-generated changelog for v1.2.0.", &target)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_commit_changelog_skips_unchanged_or_foreign_file() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, Some("v1.1.0"), "v1.1.0\n");
        vcs.expect_status_of_paths()
            .times(1)
            .returning(|_, _| Ok(String::new()));
        vcs.expect_commit_paths().never();

        let package = open(&dir, vcs).await.unwrap();
        let target = package.changelog_path(Path::new("changelogs"), "v1.0.0", "v1.1.0");
        assert!(!package.commit_changelog("Changelog", &target).await.unwrap());

        let elsewhere = TempDir::new().unwrap();
        let foreign = elsewhere.path().join("v1.0.0..v1.1.0");
        assert!(!package.commit_changelog("Changelog", &foreign).await.unwrap());
    }

    #[tokio::test]
    async fn test_generate_changelog_with_alias() {
        let dir = project_dir(Some("{}"));
        let mut vcs = opening_mock(ORIGIN, Some("v1.1.0"), "v1.1.0\n");
        vcs.expect_count_commits()
            .withf(|_, range| range == "v1.1.0..HEAD")
            .returning(|_, _| Ok("0\n".to_string()));

        let package = open(&dir, vcs).await.unwrap();
        let out = Path::new("changelogs");
        assert!(package
            .generate_changelog(out, "v1.1.0", "HEAD", Some("v1.2.0"), false)
            .await
            .unwrap());
        assert!(dir.path().join("changelogs").join("v1.1.0..v1.2.0").is_file());
    }
}
