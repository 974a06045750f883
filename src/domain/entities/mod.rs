/// Domain entities.
pub mod helper_config;
pub mod manifest;
pub mod package;

pub use helper_config::{ConfigOverrides, HelperConfig};
pub use manifest::{ManifestKind, ProjectManifest};
pub use package::{Package, PackageOptions};
