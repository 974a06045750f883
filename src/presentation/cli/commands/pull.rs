use colored::Colorize;
use std::sync::Arc;

use super::report::{failure_error, print_summary};
use crate::application::use_cases::pull_repositories::{PullConfig, PullRepositoriesUseCase};
use crate::application::use_cases::runner::RunContext;

/// Handler for the pull command
pub struct PullCommand {
    context: Arc<RunContext>,
    config: PullConfig,
}

impl PullCommand {
    pub fn new(
        context: Arc<RunContext>,
        pattern: Option<String>,
        force: bool,
        stash: bool,
    ) -> Self {
        Self {
            context,
            config: PullConfig {
                pattern,
                force,
                stash,
            },
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        println!("{} Pulling repositories...", "::".blue().bold());

        let summary = PullRepositoriesUseCase::new(self.context.clone(), self.config.clone())
            .execute()
            .await?;

        print_summary(&summary);
        failure_error(&summary)
    }
}
