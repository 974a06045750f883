use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Ecosystem a manifest file belongs to, inferred from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    Composer,
    Npm,
    Cargo,
    Other,
}

impl ManifestKind {
    pub fn from_file_name(file_name: &str) -> Self {
        match file_name {
            "composer.json" => ManifestKind::Composer,
            "package.json" => ManifestKind::Npm,
            "Cargo.toml" => ManifestKind::Cargo,
            _ => ManifestKind::Other,
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestKind::Composer => write!(f, "composer"),
            ManifestKind::Npm => write!(f, "npm"),
            ManifestKind::Cargo => write!(f, "cargo"),
            ManifestKind::Other => write!(f, "other"),
        }
    }
}

/// Project metadata read once from a package manifest.
///
/// All fields are optional; a manifest that exists but declares nothing is
/// still a valid project marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ManifestKind>,

    /// File the metadata was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl ProjectManifest {
    /// Manifest used when none is present and strictness is off.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_file(file: &Path) -> Self {
        let kind = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(ManifestKind::from_file_name);
        Self {
            kind,
            file: Some(file.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}
