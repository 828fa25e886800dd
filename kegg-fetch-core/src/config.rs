//! Configuration for fetching and exporting KEGG entries
//!
//! Loaded from a YAML file. Every section is optional and falls back to
//! built-in defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::entry::EntryKind;
use crate::export::OutputFormat;
use crate::projection::{ProjectionError, RecordSchema, default_fields};

/// Path searched when no configuration file is given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse { path: PathBuf, source: serde_yaml::Error },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeggConfig {
    /// Remote API settings
    pub kegg: KeggSettings,

    /// Where and how records are written
    pub output: OutputSettings,

    /// Reaction schema and default identifier
    pub reaction: EntrySettings,

    /// Compound schema and default identifier
    pub compound: EntrySettings,

    /// Log level, format and destination
    pub logging: LoggingSettings,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeggSettings {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for KeggSettings {
    fn default() -> Self {
        Self { base_url: "https://rest.kegg.jp".to_string(), timeout: 30 }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub data_dir: PathBuf,
    pub file_format: OutputFormat,

    /// Write a leading row-number column
    pub index: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data"), file_format: OutputFormat::Csv, index: false }
    }
}

/// Per-kind settings; unset values fall back to the kind's defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySettings {
    pub default_id: Option<String>,

    /// Ordered output fields
    pub fields: Option<Vec<String>>,

    /// Field name to flat-file section overrides
    pub sections: HashMap<String, String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,

    /// Log file; stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Full, file: None }
    }
}

impl KeggConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load an explicit file, or `config.yaml` if present, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            debug!("Loading configuration from {}", default_path.display());
            Self::from_file(default_path)
        } else {
            info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    /// Settings for one kind
    pub fn entry(&self, kind: EntryKind) -> &EntrySettings {
        match kind {
            EntryKind::Reaction => &self.reaction,
            EntryKind::Compound => &self.compound,
        }
    }

    /// Configured default identifier for a kind
    pub fn default_id(&self, kind: EntryKind) -> &str {
        self.entry(kind).default_id.as_deref().unwrap_or(kind.default_id())
    }

    /// Output schema for a kind with section overrides applied
    pub fn schema(&self, kind: EntryKind) -> RecordSchema {
        let settings = self.entry(kind);
        let fields = settings.fields.clone().unwrap_or_else(|| default_fields(kind));

        settings
            .sections
            .iter()
            .fold(RecordSchema::new(kind, fields), |schema, (field, section)| {
                schema.with_section(field, section)
            })
    }

    /// Check the configuration before any request is made
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kegg.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid { message: "kegg.base_url is empty".to_string() });
        }

        if self.kegg.timeout == 0 {
            return Err(ConfigError::Invalid {
                message: "kegg.timeout must be at least one second".to_string(),
            });
        }

        for kind in [EntryKind::Reaction, EntryKind::Compound] {
            if self.entry(kind).fields.as_ref().is_some_and(Vec::is_empty) {
                return Err(ConfigError::Invalid {
                    message: format!("{}.fields is empty", kind),
                });
            }
            self.schema(kind).validate()?;
        }

        Ok(())
    }

    /// Create the data directory and the log file's directory
    pub fn prepare_dirs(&self) -> Result<(), ConfigError> {
        let mut dirs = vec![self.output.data_dir.as_path()];
        if let Some(parent) = self.logging.file.as_deref().and_then(Path::parent) {
            dirs.push(parent);
        }

        for dir in dirs.into_iter().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|source| ConfigError::Io { path: dir.to_path_buf(), source })?;
        }

        Ok(())
    }
}
