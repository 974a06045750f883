use std::sync::Arc;
use tracing::warn;

use super::runner::{run_each, RepositoryOutcome, RunContext, RunSummary};
use crate::common::error::HelperError;
use crate::common::result::HelperResult;
use crate::domain::entities::package::Package;

pub const DIRTY_PULL_REASON: &str =
    "Local changes might be lost by pulling, commit/stash before continuing.";

/// Pull settings
#[derive(Debug, Clone, Default)]
pub struct PullConfig {
    pub pattern: Option<String>,
    /// Pull even with uncommitted changes.
    pub force: bool,
    /// Stash uncommitted changes around the pull.
    pub stash: bool,
}

/// Pulls every clean repository; dirty ones need `force` or `stash`.
pub struct PullRepositoriesUseCase {
    context: Arc<RunContext>,
    config: PullConfig,
}

impl PullRepositoriesUseCase {
    pub fn new(context: Arc<RunContext>, config: PullConfig) -> Self {
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
                pull_one(&package, &config).await
            }
        })
        .await;

        Ok(RunSummary::from_results(results))
    }
}

async fn pull_one(package: &Package, config: &PullConfig) -> HelperResult<RepositoryOutcome> {
    let dirty = package.dirty_state().await?;

    if !dirty.is_clean() && !config.force && !config.stash {
        return Ok(RepositoryOutcome::skipped(package, DIRTY_PULL_REASON));
    }

    let stashed = config.stash && !dirty.is_clean();
    if stashed {
        package.stash_changes().await?;
    }

    let pulled = package.pull().await;

    if stashed {
        if let Err(restore_error) = package.restore_changes().await {
            return Err(match pulled {
                Ok(()) => HelperError::internal_error(format!(
                    "pulled, but restoring stashed changes failed: {}",
                    restore_error
                )),
                Err(pull_error) => {
                    warn!(
                        "Restoring stashed changes in {} failed: {}",
                        package.path().display(),
                        restore_error
                    );
                    pull_error
                }
            });
        }
    }

    pulled?;
    Ok(RepositoryOutcome::done(
        package,
        if stashed { "pulled (changes stashed and restored)" } else { "pulled" },
    ))
}
