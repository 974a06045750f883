use colored::Colorize;
use std::sync::Arc;

use super::report::{failure_error, print_summary};
use crate::application::use_cases::commit_repositories::{CommitConfig, CommitRepositoriesUseCase};
use crate::application::use_cases::runner::RunContext;

/// Handler for the commit command
pub struct CommitCommand {
    context: Arc<RunContext>,
    config: CommitConfig,
}

impl CommitCommand {
    pub fn new(context: Arc<RunContext>, pattern: Option<String>, message: String) -> Self {
        Self {
            context,
            config: CommitConfig { pattern, message },
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        println!("{} Committing changes...", "::".blue().bold());

        let summary = CommitRepositoriesUseCase::new(self.context.clone(), self.config.clone())
            .execute()
            .await?;

        print_summary(&summary);
        failure_error(&summary)
    }
}
