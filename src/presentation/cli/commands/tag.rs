use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use super::report::{failure_error, print_summary};
use crate::application::use_cases::runner::RunContext;
use crate::application::use_cases::tag_release::{TagConfig, TagReleaseUseCase, VersionPrompt};
use crate::domain::value_objects::VersionBump;

/// Handler for the tag command
pub struct TagCommand {
    context: Arc<RunContext>,
    config: TagConfig,
}

impl TagCommand {
    pub fn new(
        context: Arc<RunContext>,
        pattern: Option<String>,
        bump: VersionBump,
        with_changelog: bool,
        force: bool,
        assume_yes: bool,
    ) -> Self {
        let changelog_dir = PathBuf::from(&context.config.changelog_dir);
        Self {
            context,
            config: TagConfig {
                pattern,
                bump,
                force,
                with_changelog,
                assume_yes,
                changelog_dir,
            },
        }
    }

    pub async fn execute(&self, prompt: Arc<dyn VersionPrompt>) -> anyhow::Result<()> {
        println!(
            "{}",
            format!("Loading directories to tag for: {}", self.context.root.display()).yellow()
        );
        println!();

        let summary = TagReleaseUseCase::new(self.context.clone(), self.config.clone(), prompt)
            .execute()
            .await?;

        print_summary(&summary);
        failure_error(&summary)
    }
}
