use colored::Colorize;
use std::sync::Arc;

use super::report::failure_error;
use crate::application::use_cases::runner::RunContext;
use crate::application::use_cases::status_report::{
    PackageStatus, StatusConfig, StatusReport, StatusReportUseCase,
};
use crate::presentation::cli::OutputFormat;

/// Handler for the status command
pub struct StatusCommand {
    context: Arc<RunContext>,
    pattern: Option<String>,
    output: OutputFormat,
}

impl StatusCommand {
    pub fn new(context: Arc<RunContext>, pattern: Option<String>, output: OutputFormat) -> Self {
        Self {
            context,
            pattern,
            output,
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        if self.output == OutputFormat::Text {
            println!(
                "{}",
                format!("Verifying status for: {}", self.context.root.display()).yellow()
            );
            println!();
        }

        let config = StatusConfig {
            pattern: self.pattern.clone(),
        };
        let report = StatusReportUseCase::new(self.context.clone(), config)
            .execute()
            .await?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
            OutputFormat::Text => print_text(&report),
        }

        failure_error(&report.summary)
    }
}

fn print_text(report: &StatusReport) {
    if report.summary.total() == 0 {
        println!("{}", "No matching repositories found.".yellow());
        return;
    }

    for status in &report.packages {
        print_package(status);
    }

    for failure in report.failures() {
        println!(
            "{} - {}",
            failure.name.red().bold(),
            failure.message.as_deref().unwrap_or("failed").red()
        );
    }
}

fn print_package(status: &PackageStatus) {
    println!(
        "{}",
        format!(
            "{} - branch: {}, version: {}",
            status.name,
            status.branch.as_deref().unwrap_or("none"),
            status.latest_tag.as_deref().unwrap_or("none")
        )
        .green()
    );

    if !status.dirty.is_clean() {
        println!("{}", status.dirty.summary());
    }
    if let Some(unpushed) = status.unpushed_commits.filter(|n| *n > 0) {
        println!("Commits unpushed: {}", unpushed);
    }
    if let Some(since) = status.commits_since_tag.filter(|n| *n > 0) {
        println!("Commits since latest tag: {}", since);
    }
}
