//! Repository configuration file support.
//!
//! Reads `repository.toml`:
//!
//! ```toml
//! [repository]
//! type = "snapshot"
//!
//! [snapshot]
//! path = "data/sample_content.json"
//! name = "Sample"
//!
//! [layout]
//! chip_gap_px = 12.0
//!
//! [[gazetteer.entries]]
//! name = "Ronchamp"
//! lat = 47.7044
//! lng = 6.6206
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{ErrorContext, RepositoryError};
use crate::geo::{Gazetteer, GazetteerEntry};
use crate::services::LayoutSettings;

/// Environment variable naming an explicit config file.
pub const REPOSITORY_CONFIG_ENV: &str = "REPOSITORY_CONFIG";

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub snapshot: Option<SnapshotSettings>,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub gazetteer: GazetteerSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Snapshot file preloaded at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSettings {
    pub path: PathBuf,
    #[serde(default = "default_snapshot_name")]
    pub name: String,
}

fn default_snapshot_name() -> String {
    "default".to_string()
}

impl SnapshotSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: default_snapshot_name(),
        }
    }
}

/// Extra gazetteer entries, merged over the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerSettings {
    #[serde(default)]
    pub entries: Vec<GazetteerEntry>,
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// A relative snapshot path is resolved against the config file's
    /// directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let context = || {
            ErrorContext::new("load_config")
                .with_entity("config")
                .with_entity_id(path.display())
        };

        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                context(),
            )
        })?;

        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            RepositoryError::ConfigurationError { message, .. } => {
                RepositoryError::configuration_with_context(message, context())
            }
            other => other,
        })?;

        if let (Some(snapshot), Some(dir)) = (config.snapshot.as_mut(), path.parent()) {
            if snapshot.path.is_relative() {
                snapshot.path = dir.join(&snapshot.path);
            }
        }
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load repository configuration from the default location.
    ///
    /// Uses `REPOSITORY_CONFIG` when set. Otherwise searches for
    /// `repository.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        if let Ok(path) = std::env::var(REPOSITORY_CONFIG_ENV) {
            return Self::from_file(path);
        }

        let search_paths = [
            PathBuf::from("repository.toml"),
            PathBuf::from("backend/repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Snapshot settings, required when the type is `snapshot`.
    pub fn to_snapshot_settings(&self) -> Result<Option<SnapshotSettings>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Snapshot {
            return Ok(None);
        }

        match &self.snapshot {
            Some(settings) if !settings.path.as_os_str().is_empty() => Ok(Some(settings.clone())),
            _ => Err(RepositoryError::configuration(
                "Snapshot repository requires 'snapshot.path' setting",
            )),
        }
    }

    /// Built-in gazetteer extended with the configured entries.
    pub fn build_gazetteer(&self) -> Gazetteer {
        if self.gazetteer.entries.is_empty() {
            Gazetteer::builtin()
        } else {
            Gazetteer::with_extra_entries(self.gazetteer.entries.iter().cloned())
        }
    }
}
