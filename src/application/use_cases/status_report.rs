use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::runner::{run_each, OutcomeStatus, RepositoryOutcome, RunContext, RunSummary};
use crate::common::result::HelperResult;
use crate::domain::value_objects::{DirtyState, RemoteInfo};

/// Status report settings
#[derive(Debug, Clone, Default)]
pub struct StatusConfig {
    /// Regular expression on directory names
    pub pattern: Option<String>,
}

/// Snapshot of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageStatus {
    pub name: String,
    pub path: PathBuf,
    pub branch: Option<String>,
    pub latest_tag: Option<String>,
    pub remote: Option<RemoteInfo>,
    pub dirty: DirtyState,
    pub unpushed_commits: Option<usize>,
    /// `None` when there is no tag to count from.
    pub commits_since_tag: Option<usize>,
}

/// Status of every matching repository, in enumeration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    pub packages: Vec<PackageStatus>,
    pub summary: RunSummary,
}

impl StatusReport {
    pub fn has_failures(&self) -> bool {
        self.summary.has_failures()
    }

    /// Failed repositories, which have no package status.
    pub fn failures(&self) -> impl Iterator<Item = &RepositoryOutcome> {
        self.summary
            .outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Failed)
    }
}

/// Read-only report; no gate.
pub struct StatusReportUseCase {
    context: Arc<RunContext>,
    config: StatusConfig,
}

impl StatusReportUseCase {
    pub fn new(context: Arc<RunContext>, config: StatusConfig) -> Self {
        Self { context, config }
    }

    pub async fn execute(&self) -> HelperResult<StatusReport> {
        let candidates = self.context.candidates(self.config.pattern.as_deref())?;
        let context = self.context.clone();

        let results = run_each(candidates, self.context.jobs(), move |candidate| {
            let context = context.clone();
            async move {
                let package = context.open(&candidate).await?;
                let dirty = package.dirty_state().await?;
                let status = PackageStatus {
                    name: package.name(),
                    path: package.path().to_path_buf(),
                    branch: package.branch().map(str::to_string),
                    latest_tag: package.latest_tag().map(str::to_string),
                    remote: package.remote().cloned(),
                    dirty,
                    unpushed_commits: package.unpushed_commit_count().await,
                    commits_since_tag: package.changes_since(None, "HEAD").await,
                };
                let outcome = RepositoryOutcome::done(&package, "reported");
                Ok((status, outcome))
            }
        })
        .await;

        let mut report = StatusReport::default();
        for (candidate, result) in results {
            match result {
                Ok((status, outcome)) => {
                    report.packages.push(status);
                    report.summary.add_outcome(outcome);
                }
                Err(error) => report
                    .summary
                    .add_outcome(RepositoryOutcome::failed(&candidate, &error)),
            }
        }
        Ok(report)
    }
}
