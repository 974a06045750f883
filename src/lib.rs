//! # git-helpers - multi-repository git maintenance
//!
//! `git-helpers` works on a directory full of independent project checkouts
//! (for example a vendor or packages directory) and inspects, pulls,
//! commits, tags and writes changelogs for each of them in one pass.
//!
//! ## Quick Start
//!
//! ```bash
//! # branch, latest version and pending changes of every package
//! git-helpers status
//!
//! # pull clean checkouts whose directory name starts with "tenancy"
//! git-helpers pull '^tenancy' --stash
//!
//! # tag every package with new commits, suggesting a minor bump
//! git-helpers tag --up minor --changelog
//! ```
//!
//! ## Architecture
//!
//! Layers depend inwards only:
//!
//! - [`domain`]: Parsed repository state and the per-repository accessor
//! - [`application`]: Repository discovery and the run orchestrators
//! - [`infrastructure`]: `git` subprocesses and file system access
//! - [`presentation`]: Subcommands, console output and the version prompt
//! - [`common`]: Error type, result alias and argument checks
//!
//! ## Domain Model
//!
//! - [`domain::entities::package::Package`]: One checkout with its remote, branch and latest tag
//! - [`domain::value_objects::version::Version`]: Strict `[prefix]MAJOR.MINOR.PATCH` versions
//! - [`domain::value_objects::tag_sequence::TagSequence`]: Tags in semantic-version order
//! - [`domain::value_objects::dirty_state::DirtyState`]: Uncommitted files per status category
//! - [`domain::value_objects::change_set::ChangeSet`]: One-line commit summaries between two revisions
//!
//! ## Use Cases
//!
//! - [`application::use_cases::status_report`]: Report the state of every repository
//! - [`application::use_cases::pull_repositories`]: Pull, optionally stashing local changes
//! - [`application::use_cases::commit_repositories`]: Commit all changes with one message
//! - [`application::use_cases::tag_release`]: Suggest, create and push the next version tag
//! - [`application::use_cases::generate_changelogs`]: One changelog file per tag range
//!
//! ## Error Handling
//!
//! - [`common::error::HelperError`]: Main error type with detailed context
//! - [`common::result::HelperResult`]: Type alias for `Result<T, HelperError>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use git_helpers::application::use_cases::runner::RunContext;
//! use git_helpers::application::use_cases::status_report::{StatusConfig, StatusReportUseCase};
//! use git_helpers::domain::entities::helper_config::HelperConfig;
//! use git_helpers::infrastructure::vcs::GitCli;
//!
//! # async fn example() -> git_helpers::Result<()> {
//! let vcs = Arc::new(GitCli::new());
//! let context = Arc::new(RunContext::new("/srv/vendor", HelperConfig::default(), vcs));
//! let report = StatusReportUseCase::new(context, StatusConfig::default()).execute().await?;
//!
//! for package in &report.packages {
//!     println!("{}: {}", package.name, package.latest_tag.as_deref().unwrap_or("none"));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::common::error::HelperError;
pub use crate::common::result::HelperResult as Result;
