/// One orchestrator per user-facing action, on a shared runner.
pub mod commit_repositories;
pub mod generate_changelogs;
pub mod pull_repositories;
pub mod runner;
pub mod status_report;
pub mod tag_release;

pub use runner::{OutcomeStatus, RepositoryOutcome, RunContext, RunSummary};
