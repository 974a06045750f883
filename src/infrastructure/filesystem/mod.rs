/// File system access: manifests, configuration and changelog output.
pub mod changelog_writer;
pub mod config_store;
pub mod manifest_store;

pub use changelog_writer::{ChangelogWriter, WriteOutcome};
pub use config_store::ConfigStore;
pub use manifest_store::ManifestStore;
