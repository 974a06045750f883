//! Skeleton shared by the orchestrators: enumerate, open a package per
//! directory, apply the operation, collect one outcome per repository.

use futures::future::join_all;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::application::services::repository_enumerator::{
    RepositoryCandidate, RepositoryEnumerator,
};
use crate::common::error::HelperError;
use crate::common::result::HelperResult;
use crate::domain::entities::helper_config::HelperConfig;
use crate::domain::entities::package::{Package, PackageOptions};
use crate::infrastructure::vcs::VcsClient;

/// Everything an orchestrator needs besides its own flags.
#[derive(Clone)]
pub struct RunContext {
    pub root: PathBuf,
    pub config: HelperConfig,
    pub vcs: Arc<dyn VcsClient>,
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RunContext {
    pub fn new(root: impl Into<PathBuf>, config: HelperConfig, vcs: Arc<dyn VcsClient>) -> Self {
        Self {
            root: root.into(),
            config,
            vcs,
        }
    }

    pub fn enumerator(&self, pattern: Option<&str>) -> HelperResult<RepositoryEnumerator> {
        RepositoryEnumerator::new(
            &self.root,
            self.config.manifest_files.clone(),
            self.config.strict_manifest,
        )
        .with_pattern(pattern)
    }

    /// Enumerates eagerly so workers can take ownership of their candidate.
    pub fn candidates(&self, pattern: Option<&str>) -> HelperResult<Vec<RepositoryCandidate>> {
        Ok(self.enumerator(pattern)?.scan()?.collect())
    }

    pub fn package_options(&self) -> PackageOptions {
        PackageOptions::from(&self.config)
    }

    /// Opens a fresh package for `candidate`.
    pub async fn open(&self, candidate: &RepositoryCandidate) -> HelperResult<Package> {
        Package::open(&candidate.path, self.vcs.clone(), &self.package_options()).await
    }

    pub fn jobs(&self) -> usize {
        self.config.jobs.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Done,
    Skipped,
    Failed,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Done => write!(f, "done"),
            OutcomeStatus::Skipped => write!(f, "skipped"),
            OutcomeStatus::Failed => write!(f, "failed"),
        }
    }
}

/// What happened to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryOutcome {
    pub name: String,
    pub path: PathBuf,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RepositoryOutcome {
    pub fn done(package: &Package, message: impl Into<String>) -> Self {
        Self {
            name: package.name(),
            path: package.path().to_path_buf(),
            status: OutcomeStatus::Done,
            message: Some(message.into()),
        }
    }

    pub fn skipped(package: &Package, reason: impl Into<String>) -> Self {
        Self {
            name: package.name(),
            path: package.path().to_path_buf(),
            status: OutcomeStatus::Skipped,
            message: Some(reason.into()),
        }
    }

    pub fn failed(candidate: &RepositoryCandidate, error: &HelperError) -> Self {
        Self {
            name: candidate.name.clone(),
            path: candidate.path.clone(),
            status: OutcomeStatus::Failed,
            message: Some(error.to_string()),
        }
    }
}

/// Outcomes in enumeration order with per-status counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<RepositoryOutcome>,
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_outcome(&mut self, outcome: RepositoryOutcome) {
        match outcome.status {
            OutcomeStatus::Done => self.done += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
            OutcomeStatus::Failed => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Turns per-repository results into outcomes; errors become failures.
    pub fn from_results(
        results: Vec<(RepositoryCandidate, HelperResult<RepositoryOutcome>)>,
    ) -> Self {
        let mut summary = Self::new();
        for (candidate, result) in results {
            summary.add_outcome(match result {
                Ok(outcome) => outcome,
                Err(error) => RepositoryOutcome::failed(&candidate, &error),
            });
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Runs `task` once per candidate and returns results in candidate order.
///
/// With `jobs <= 1` candidates are processed one after another; otherwise
/// at most `jobs` run at a time. Every subprocess carries its own working
/// directory, so workers share nothing but the result vector.
pub async fn run_each<T, F, Fut>(
    candidates: Vec<RepositoryCandidate>,
    jobs: usize,
    task: F,
) -> Vec<(RepositoryCandidate, HelperResult<T>)>
where
    T: Send + 'static,
    F: Fn(RepositoryCandidate) -> Fut,
    Fut: Future<Output = HelperResult<T>> + Send + 'static,
{
    if jobs <= 1 {
        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let result = task(candidate.clone()).await;
            results.push((candidate, result));
        }
        return results;
    }

    let semaphore = Arc::new(Semaphore::new(jobs));
    let tasks: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            let semaphore = semaphore.clone();
            let work = task(candidate.clone());
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| {
                    HelperError::internal_error(format!("Failed to acquire worker slot: {}", e))
                })?;
                work.await
            })
        })
        .collect();

    let joined = join_all(tasks).await;

    candidates
        .into_iter()
        .zip(joined)
        .map(|(candidate, joined)| {
            let result = joined.unwrap_or_else(|e| {
                Err(HelperError::internal_error(format!(
                    "Worker for {} stopped unexpectedly: {}",
                    candidate.name, e
                )))
            });
            (candidate, result)
        })
        .collect()
}
