use std::path::PathBuf;
use std::sync::Arc;

use super::runner::{run_each, RepositoryOutcome, RunContext, RunSummary};
use crate::common::result::HelperResult;
use crate::domain::entities::helper_config::DEFAULT_CHANGELOG_DIR;
use crate::domain::entities::package::Package;
use crate::domain::value_objects::{SortDirection, TagSequence, Version};

/// Changelog settings
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    pub pattern: Option<String>,
    /// Run even with uncommitted changes.
    pub force: bool,
    /// Replace changelog files that already exist.
    pub overwrite: bool,
    /// Commit each written file.
    pub commit: bool,
    /// Label for a final `<latest>..HEAD` changelog.
    pub head: Option<String>,
    /// Relative paths resolve inside each repository.
    pub output_dir: PathBuf,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            force: false,
            overwrite: false,
            commit: false,
            head: None,
            output_dir: PathBuf::from(DEFAULT_CHANGELOG_DIR),
        }
    }
}

/// Writes one changelog per consecutive pair of version tags.
pub struct GenerateChangelogsUseCase {
    context: Arc<RunContext>,
    config: ChangelogConfig,
}

impl GenerateChangelogsUseCase {
    pub fn new(context: Arc<RunContext>, config: ChangelogConfig) -> Self {
        Self { context, config }
    }

    pub async fn execute(&self) -> HelperResult<RunSummary> {
        let candidates = self.context.candidates(self.config.pattern.as_deref())?;
        let context = self.context.clone();
        let config = Arc::new(self.config.clone());

        let results = run_each(candidates, self.context.jobs(), move |candidate| {
            let context = context.clone();
            let config = config.clone();
            async move {
                let package = context.open(&candidate).await?;
                changelogs_for(&package, &config).await
            }
        })
        .await;

        Ok(RunSummary::from_results(results))
    }
}

async fn changelogs_for(
    package: &Package,
    config: &ChangelogConfig,
) -> HelperResult<RepositoryOutcome> {
    let dirty = package.dirty_state().await?;
    if !dirty.is_clean() && !config.force {
        return Ok(RepositoryOutcome::skipped(
            package,
            format!("uncommitted changes ({})", dirty.summary()),
        ));
    }

    // Only version tags delimit releases.
    let tags = TagSequence::new(
        package
            .tags(SortDirection::Asc)
            .await
            .into_vec()
            .into_iter()
            .filter(|tag| Version::parse(tag).is_some()),
        SortDirection::Asc,
    );
    if tags.is_empty() {
        return Ok(RepositoryOutcome::skipped(package, "no version tags"));
    }

    let mut ranges: Vec<(String, String, Option<String>)> = tags
        .pairs()
        .map(|(from, to)| (from.to_string(), to.to_string(), None))
        .collect();
    // Unreleased work starts at the newest release reachable from HEAD.
    let latest = package.latest_tag().filter(|tag| Version::parse(tag).is_some());
    if let (Some(label), Some(latest)) = (&config.head, latest) {
        ranges.push((latest.to_string(), "HEAD".to_string(), Some(label.clone())));
    }

    let (mut written, mut kept) = (0usize, 0usize);
    for (from, to, alias) in &ranges {
        let created = package
            .generate_changelog(&config.output_dir, from, to, alias.as_deref(), config.overwrite)
            .await?;
        if !created {
            kept += 1;
            continue;
        }
        written += 1;

        if config.commit {
            let version = alias.as_deref().unwrap_or(to);
            let path = package.changelog_path(&config.output_dir, from, version);
            package
                .commit_changelog(&format!("Changelog added for {}.", version), &path)
                .await?;
        }
    }

    Ok(RepositoryOutcome::done(
        package,
        format!("{} written, {} already present", written, kept),
    ))
}
