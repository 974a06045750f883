use colored::Colorize;

use crate::application::use_cases::runner::{OutcomeStatus, RunSummary};

/// Prints one line per repository and a closing count line.
pub fn print_summary(summary: &RunSummary) {
    if summary.total() == 0 {
        println!("{}", "No matching repositories found.".yellow());
        return;
    }

    for outcome in &summary.outcomes {
        let message = outcome.message.as_deref().unwrap_or_default();
        match outcome.status {
            OutcomeStatus::Done => {
                println!("{} {}: {}", "✓".green().bold(), outcome.name.bold(), message)
            }
            OutcomeStatus::Skipped => {
                println!("{} {}: {}", "-".yellow().bold(), outcome.name.bold(), message.yellow())
            }
            OutcomeStatus::Failed => {
                println!("{} {}: {}", "✗".red().bold(), outcome.name.bold(), message.red())
            }
        }
    }

    println!();
    println!(
        "{} done, {} skipped, {} failed",
        summary.done.to_string().green(),
        summary.skipped.to_string().yellow(),
        summary.failed.to_string().red()
    );
}

/// Error to return when any repository failed, so the process exits non-zero.
pub fn failure_error(summary: &RunSummary) -> anyhow::Result<()> {
    if summary.has_failures() {
        anyhow::bail!(
            "{} of {} repositories failed",
            summary.failed,
            summary.total()
        );
    }
    Ok(())
}
