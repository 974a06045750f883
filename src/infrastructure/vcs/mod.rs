/// Version-control boundary
///
/// The core only talks to the version-control tool through [`VcsClient`].
/// [`GitCli`] is the `git` command-line implementation.
pub mod git_cli;
pub mod vcs_interface;

pub use git_cli::GitCli;
pub use vcs_interface::{VcsClient, VcsError};

#[cfg(test)]
pub use vcs_interface::MockVcsClient;
