use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::vcs::VcsError;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("{} does not exist or is not a directory", .path.display())]
    NotFound { path: PathBuf },

    #[error("No project manifest ({expected}) in {}", .path.display())]
    NotAProject { path: PathBuf, expected: String },

    #[error("Version control command failed: {source}")]
    Subprocess {
        #[from]
        source: VcsError,
    },

    #[error(
        "Latest tag is ambiguous in {}: history order gives '{history_tag}', version order gives '{version_tag}'; using '{chosen}'",
        .path.display()
    )]
    AmbiguousTagResolution {
        path: PathBuf,
        history_tag: String,
        version_tag: String,
        chosen: String,
    },

    #[error("Tag '{tag}' was created locally but publishing it failed: {reason}")]
    TagPublishFailed { tag: String, reason: String },

    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    #[error("Invalid match pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Manifest error: {message}")]
    ManifestError {
        message: String,
        file_path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl HelperError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn not_a_project(path: impl Into<PathBuf>, expected: &[String]) -> Self {
        Self::NotAProject {
            path: path.into(),
            expected: expected.join(", "),
        }
    }

    pub fn tag_publish_failed(tag: impl Into<String>, reason: impl ToString) -> Self {
        Self::TagPublishFailed {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_version(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn manifest_error_with_source(
        message: impl Into<String>,
        file_path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ManifestError {
            message: message.into(),
            file_path,
            source: Some(Box::new(source)),
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Whether the failure came from a subprocess exceeding its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Subprocess {
                source: VcsError::Timeout { .. }
            }
        )
    }
}

impl From<std::io::Error> for HelperError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for HelperError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config_error_with_source("YAML parsing failed", error)
    }
}

impl From<serde_json::Error> for HelperError {
    fn from(error: serde_json::Error) -> Self {
        Self::manifest_error_with_source("JSON parsing failed", None, error)
    }
}

impl From<toml::de::Error> for HelperError {
    fn from(error: toml::de::Error) -> Self {
        Self::manifest_error_with_source("TOML parsing failed", None, error)
    }
}

impl From<validator::ValidationErrors> for HelperError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::config_error_with_source("Configuration validation failed", errors)
    }
}
