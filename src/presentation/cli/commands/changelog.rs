use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use super::report::{failure_error, print_summary};
use crate::application::use_cases::generate_changelogs::{
    ChangelogConfig, GenerateChangelogsUseCase,
};
use crate::application::use_cases::runner::RunContext;

/// Handler for the changelog command
pub struct ChangelogCommand {
    context: Arc<RunContext>,
    config: ChangelogConfig,
}

impl ChangelogCommand {
    pub fn new(
        context: Arc<RunContext>,
        pattern: Option<String>,
        force: bool,
        overwrite: bool,
        commit: bool,
        head: Option<String>,
        path: Option<PathBuf>,
    ) -> Self {
        let output_dir = path.unwrap_or_else(|| PathBuf::from(&context.config.changelog_dir));
        Self {
            context,
            config: ChangelogConfig {
                pattern,
                force,
                overwrite,
                commit,
                head,
                output_dir,
            },
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        println!(
            "{} Writing changelogs to {}...",
            "::".blue().bold(),
            self.config.output_dir.display()
        );

        let summary = GenerateChangelogsUseCase::new(self.context.clone(), self.config.clone())
            .execute()
            .await?;

        print_summary(&summary);
        failure_error(&summary)
    }
}
