use std::sync::Arc;

use super::runner::{run_each, RepositoryOutcome, RunContext, RunSummary};
use crate::common::result::HelperResult;
use crate::common::shell::check_message;

/// Commit settings
#[derive(Debug, Clone, Default)]
pub struct CommitConfig {
    pub pattern: Option<String>,
    pub message: String,
}

/// Commits all changes in every dirty repository with one message.
pub struct CommitRepositoriesUseCase {
    context: Arc<RunContext>,
    config: CommitConfig,
}

impl CommitRepositoriesUseCase {
    pub fn new(context: Arc<RunContext>, config: CommitConfig) -> Self {
        Self { context, config }
    }

    pub async fn execute(&self) -> HelperResult<RunSummary> {
        // Reject a bad message once instead of once per repository.
        check_message("message", &self.config.message)?;

        let candidates = self.context.candidates(self.config.pattern.as_deref())?;
        let context = self.context.clone();
        let message = Arc::new(self.config.message.clone());

        let results = run_each(candidates, self.context.jobs(), move |candidate| {
            let context = context.clone();
            let message = message.clone();
            async move {
                let package = context.open(&candidate).await?;
                let dirty = package.dirty_state().await?;
                if dirty.is_clean() {
                    return Ok(RepositoryOutcome::skipped(&package, "nothing to commit"));
                }

                package.commit(&message).await?;
                Ok(RepositoryOutcome::done(
                    &package,
                    format!("committed ({})", dirty.summary()),
                ))
            }
        })
        .await;

        Ok(RunSummary::from_results(results))
    }
}
