use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::runner::{RepositoryOutcome, RunContext, RunSummary};
use crate::common::error::HelperError;
use crate::common::result::HelperResult;
use crate::common::shell::check_ref_label;
use crate::domain::entities::package::Package;
use crate::domain::value_objects::{suggest_next, ChangeSet, VersionBump};

/// Tag settings
#[derive(Debug, Clone, Default)]
pub struct TagConfig {
    pub pattern: Option<String>,
    /// Component used for the suggested version.
    pub bump: VersionBump,
    /// Tag even when nothing was committed since the latest tag.
    pub force: bool,
    /// Write and commit `<latest>..<version>` before tagging.
    pub with_changelog: bool,
    /// Accept the suggested version without asking.
    pub assume_yes: bool,
    /// Changelog directory; relative paths resolve inside each repository.
    pub changelog_dir: PathBuf,
}

/// What the user is asked when choosing a version.
#[derive(Debug, Clone)]
pub struct VersionRequest {
    pub package_name: String,
    pub latest_tag: Option<String>,
    pub suggestion: Option<String>,
    /// Changes since the latest tag, newest first.
    pub changes: ChangeSet,
}

/// Source of the version to tag with. `Ok(None)` skips the repository.
pub trait VersionPrompt: Send + Sync {
    fn ask_version(&self, request: &VersionRequest) -> HelperResult<Option<String>>;
}

/// Tags repositories one at a time, since each may prompt.
pub struct TagReleaseUseCase {
    context: Arc<RunContext>,
    config: TagConfig,
    prompt: Arc<dyn VersionPrompt>,
}

impl TagReleaseUseCase {
    pub fn new(
        context: Arc<RunContext>,
        config: TagConfig,
        prompt: Arc<dyn VersionPrompt>,
    ) -> Self {
        Self {
            context,
            config,
            prompt,
        }
    }

    pub async fn execute(&self) -> HelperResult<RunSummary> {
        let mut summary = RunSummary::new();

        for candidate in self.context.candidates(self.config.pattern.as_deref())? {
            let result = match self.context.open(&candidate).await {
                Ok(package) => self.tag_one(&package).await,
                Err(error) => Err(error),
            };
            summary.add_outcome(match result {
                Ok(outcome) => outcome,
                Err(error) => RepositoryOutcome::failed(&candidate, &error),
            });
        }

        Ok(summary)
    }

    async fn tag_one(&self, package: &Package) -> HelperResult<RepositoryOutcome> {
        let latest_tag = package.latest_tag().map(str::to_string);

        if let Some(tag) = &latest_tag {
            match package.changes_since(Some(tag.as_str()), "HEAD").await {
                Some(0) if !self.config.force => {
                    return Ok(RepositoryOutcome::skipped(
                        package,
                        format!("no commits since {}", tag),
                    ));
                }
                Some(_) => {}
                None if self.config.force => {}
                None => {
                    return Err(HelperError::internal_error(format!(
                        "could not count commits since {}",
                        tag
                    )));
                }
            }
        }

        let request = VersionRequest {
            package_name: package.name(),
            latest_tag: latest_tag.clone(),
            suggestion: suggest_next(latest_tag.as_deref(), self.config.bump),
            changes: package.changes_between(None, "HEAD").await.unwrap_or_default(),
        };

        let answer = if self.config.assume_yes {
            request.suggestion.clone()
        } else {
            self.prompt.ask_version(&request)?
        };

        let version = match answer.map(|v| v.trim().to_string()) {
            Some(version) if !version.is_empty() => version,
            _ => return Ok(RepositoryOutcome::skipped(package, "no version provided")),
        };
        check_ref_label("version", &version)?;

        if self.config.with_changelog {
            self.write_changelog(package, latest_tag.as_deref(), &version).await?;
        }

        package.add_tag(&version).await?;
        info!("Tagged {} as {}", package.name(), version);
        Ok(RepositoryOutcome::done(package, format!("tagged {}", version)))
    }

    async fn write_changelog(
        &self,
        package: &Package,
        latest_tag: Option<&str>,
        version: &str,
    ) -> HelperResult<()> {
        let Some(from) = latest_tag else {
            warn!("{}: no previous tag, skipping changelog", package.name());
            return Ok(());
        };

        let written = package
            .generate_changelog(&self.config.changelog_dir, from, "HEAD", Some(version), false)
            .await?;
        let path = package.changelog_path(&self.config.changelog_dir, from, version);
        if !written {
            warn!(
                "{}: changelog {} already exists, leaving it untouched",
                package.name(),
                path.display()
            );
            return Ok(());
        }

        package
            .commit_changelog(&format!("Auto-generated changelog for {}.", version), &path)
            .await?;
        Ok(())
    }
}
