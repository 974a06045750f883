/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Version-control subprocesses (`git` with an explicit working directory)
/// - File system operations (manifests, config file, changelog output)
pub mod filesystem;
pub mod vcs;

// Re-export commonly used types
pub use filesystem::{ChangelogWriter, ConfigStore, ManifestStore};
pub use vcs::{GitCli, VcsClient, VcsError};
