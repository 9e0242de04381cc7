//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::checksum::content_checksum;
use super::repo_config::{RepositoryConfig, SnapshotSettings};
use super::repositories::LocalRepository;
use super::repository::{ContentRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::parsing::{load_any_from_file, NormalizedContent};

/// Environment variable selecting the repository type.
pub const REPOSITORY_TYPE_ENV: &str = "REPOSITORY_TYPE";
/// Environment variable naming a content file to preload.
pub const CONTENT_SNAPSHOT_ENV: &str = "CONTENT_SNAPSHOT";

/// Attempts made to read a snapshot file before giving up on transient I/O errors.
const SNAPSHOT_LOAD_ATTEMPTS: u32 = 3;
const SNAPSHOT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Read a snapshot, retrying while the failure is retryable.
fn load_snapshot_file(path: &Path) -> RepositoryResult<NormalizedContent> {
    let mut attempt = 1;
    loop {
        match load_any_from_file(path) {
            Ok(loaded) => return Ok(loaded),
            Err(e) => {
                let err = RepositoryError::from(e).with_operation("load_snapshot");
                if !err.is_retryable() || attempt >= SNAPSHOT_LOAD_ATTEMPTS {
                    return Err(err);
                }
                log::warn!(
                    "Reading snapshot {} failed (attempt {}/{}): {}",
                    path.display(),
                    attempt,
                    SNAPSHOT_LOAD_ATTEMPTS,
                    err
                );
                std::thread::sleep(SNAPSHOT_RETRY_DELAY * attempt);
                attempt += 1;
            }
        }
    }
}

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Empty in-memory repository
    Memory,
    /// In-memory repository preloaded from a content file
    Snapshot,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("memory", "local", "snapshot", "file").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" | "local" => Ok(Self::Memory),
            "snapshot" | "file" => Ok(Self::Snapshot),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Snapshot if `CONTENT_SNAPSHOT` is
    /// set, otherwise Memory.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var(REPOSITORY_TYPE_ENV) {
            return val.parse().unwrap_or(Self::Memory);
        }

        if std::env::var(CONTENT_SNAPSHOT_ENV).is_ok() {
            Self::Snapshot
        } else {
            Self::Memory
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use arch_timeline::db::{RepositoryFactory, RepositoryType, SnapshotSettings};
///
/// let memory = RepositoryFactory::create_local();
/// let preloaded = RepositoryFactory::create(
///     RepositoryType::Snapshot,
///     Some(&SnapshotSettings::new("data/sample_content.json")),
/// )?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `snapshot` is required for [`RepositoryType::Snapshot`] and ignored
    /// otherwise.
    pub fn create(
        repo_type: RepositoryType,
        snapshot: Option<&SnapshotSettings>,
    ) -> RepositoryResult<Arc<dyn ContentRepository>> {
        match repo_type {
            RepositoryType::Memory => Ok(Self::create_local()),
            RepositoryType::Snapshot => {
                let settings = snapshot.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Snapshot repository requires a snapshot path",
                    )
                })?;
                let repo = Self::create_snapshot(settings)?;
                Ok(repo as Arc<dyn ContentRepository>)
            }
        }
    }

    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<dyn ContentRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository holding the dataset in `settings.path`.
    ///
    /// The file may hold a normalized snapshot or raw content documents.
    pub fn create_snapshot(settings: &SnapshotSettings) -> RepositoryResult<Arc<LocalRepository>> {
        let loaded = load_snapshot_file(&settings.path)?;
        let checksum = content_checksum(&loaded.content).map_err(|e| {
            RepositoryError::internal_with_context(
                e.to_string(),
                ErrorContext::new("load_snapshot").with_entity("snapshot"),
            )
        })?;

        let repo = LocalRepository::new();
        let info = repo.insert(&settings.name, &loaded.content, &checksum)?;
        log::info!(
            "Preloaded dataset {} '{}' from {} ({} movements, {} works, {} skipped documents)",
            info.dataset_id,
            info.name,
            settings.path.display(),
            info.counts.movements,
            info.counts.works,
            loaded.report.skipped.len()
        );
        Ok(Arc::new(repo))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` and `CONTENT_SNAPSHOT`.
    pub fn from_env() -> RepositoryResult<Arc<dyn ContentRepository>> {
        let repo_type = RepositoryType::from_env();
        let snapshot = std::env::var(CONTENT_SNAPSHOT_ENV)
            .ok()
            .map(SnapshotSettings::new);
        Self::create(repo_type, snapshot.as_ref())
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn ContentRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn ContentRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    /// Create repository from a RepositoryConfig instance.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn ContentRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        let snapshot = config.to_snapshot_settings()?;
        Self::create(repo_type, snapshot.as_ref())
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use arch_timeline::db::{RepositoryBuilder, RepositoryType};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Snapshot)
///     .snapshot_path("data/sample_content.json")
///     .build()?;
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    snapshot: Option<SnapshotSettings>,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            snapshot: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    pub fn snapshot(mut self, settings: SnapshotSettings) -> Self {
        self.snapshot = Some(settings);
        self
    }

    /// Preload `path` under the default dataset name.
    pub fn snapshot_path(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.snapshot(SnapshotSettings::new(path))
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.repo_type = RepositoryType::from_env();
        if let Ok(path) = std::env::var(CONTENT_SNAPSHOT_ENV) {
            self.snapshot = Some(SnapshotSettings::new(path));
        }
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(
        self,
        config_path: P,
    ) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.apply_config(&repo_config)
    }

    /// Load configuration from default location.
    pub fn from_default_config(self) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_default_location()?;
        self.apply_config(&repo_config)
    }

    fn apply_config(mut self, repo_config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.snapshot = repo_config.to_snapshot_settings()?;
        Ok(self)
    }

    /// Build the repository instance.
    pub fn build(self) -> RepositoryResult<Arc<dyn ContentRepository>> {
        RepositoryFactory::create(self.repo_type, self.snapshot.as_ref())
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
