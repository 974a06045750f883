use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::common::error::HelperError;
use crate::common::result::HelperResult;
use crate::domain::entities::manifest::{ManifestKind, ProjectManifest};

/// Locates and reads package manifests (`composer.json`, `package.json`,
/// `Cargo.toml`, or any JSON/TOML/YAML file configured by name).
#[derive(Debug, Clone)]
pub struct ManifestStore {
    manifest_files: Vec<String>,
}

impl ManifestStore {
    pub fn new(manifest_files: Vec<String>) -> Self {
        Self { manifest_files }
    }

    /// First configured manifest file present in `dir`.
    pub fn find(&self, dir: &Path) -> Option<PathBuf> {
        self.manifest_files
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Whether `dir` contains any configured manifest.
    pub fn is_project(&self, dir: &Path) -> bool {
        self.find(dir).is_some()
    }

    /// Reads the manifest in `dir`. `Ok(None)` when there is none.
    pub async fn load(&self, dir: &Path) -> HelperResult<Option<ProjectManifest>> {
        match self.find(dir) {
            Some(file) => Self::load_file(&file).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn load_file(file: &Path) -> HelperResult<ProjectManifest> {
        let content = async_fs::read_to_string(file).await.map_err(|e| {
            HelperError::filesystem_error_with_source(
                format!("Failed to read manifest {}", file.display()),
                Some(file.to_path_buf()),
                e,
            )
        })?;

        let value = parse_document(file, &content)?;
        let mut manifest = ProjectManifest::from_file(file);

        // Cargo keeps its metadata under [package].
        let fields = match manifest.kind {
            Some(ManifestKind::Cargo) => value.get("package").unwrap_or(&value),
            _ => &value,
        };

        manifest.name = string_field(fields, "name");
        manifest.description = string_field(fields, "description");
        manifest.version = string_field(fields, "version");
        manifest.license = string_field(fields, "license");
        manifest.homepage = string_field(fields, "homepage");
        manifest.keywords = fields
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(manifest)
    }
}

fn parse_document(file: &Path, content: &str) -> HelperResult<Value> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let wrap = |format: &str, source: Box<dyn std::error::Error + Send + Sync>| {
        HelperError::ManifestError {
            message: format!("{} parsing failed for {}", format, file.display()),
            file_path: Some(file.to_path_buf()),
            source: Some(source),
        }
    };

    match extension.as_str() {
        "toml" => {
            let value: toml::Value =
                toml::from_str(content).map_err(|e| wrap("TOML", Box::new(e)))?;
            serde_json::to_value(value).map_err(|e| wrap("TOML", Box::new(e)))
        }
        "yml" | "yaml" => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| wrap("YAML", Box::new(e)))?;
            serde_json::to_value(value).map_err(|e| wrap("YAML", Box::new(e)))
        }
        _ => serde_json::from_str(content).map_err(|e| wrap("JSON", Box::new(e))),
    }
}

/// String value of `key`; arrays of strings (composer licenses) are joined.
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}
