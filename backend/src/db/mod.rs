//! Dataset storage.
//!
//! This module provides abstractions for storing normalized datasets via the
//! Repository pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                             │
//! │  - Normalization of raw documents                        │
//! │  - Checksum deduplication                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/content.rs)                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │   (in-memory, optionally snapshot-preloaded)  │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use arch_timeline::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!     let datasets = services::list_datasets(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Service Layer ====================

pub use services::{
    get_dataset, get_dataset_info, health_check, ingest_documents, list_datasets, store_dataset,
    IngestOutcome,
};

// ==================== Repository Pattern Exports ====================

pub use checksum::{calculate_checksum, content_checksum};
pub use repo_config::{RepositoryConfig, SnapshotSettings};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{ContentRepository, ErrorContext, RepositoryError, RepositoryResult};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn ContentRepository>> = OnceLock::new();

/// Pick the repository source: an explicit or default `repository.toml` when
/// one exists, otherwise the environment.
fn create_selected_repository() -> RepositoryResult<Arc<dyn ContentRepository>> {
    match RepositoryConfig::from_default_location() {
        Ok(config) => RepositoryFactory::from_repository_config(&config),
        Err(err) if std::env::var(repo_config::REPOSITORY_CONFIG_ENV).is_ok() => Err(err),
        Err(_) => RepositoryFactory::from_env(),
    }
}

/// Initialize the global repository singleton.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().context("Failed to initialize repository")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn ContentRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
