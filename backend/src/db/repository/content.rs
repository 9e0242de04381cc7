//! Content repository trait for dataset storage and retrieval.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{DatasetId, DatasetInfo};
use crate::models::ContentSet;

/// Repository trait for normalized datasets.
///
/// Datasets are immutable once stored. A dataset is identified by a numeric
/// [`DatasetId`] and deduplicated by the checksum of its normalized content.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Check that the storage backend is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a normalized dataset.
    ///
    /// Idempotent on `checksum`: when a dataset with the same checksum exists,
    /// its info is returned and nothing new is stored.
    ///
    /// # Returns
    /// * `Ok(DatasetInfo)` - Info of the new or existing dataset
    /// * `Err(RepositoryError)` - If the dataset cannot be stored
    async fn store_dataset(
        &self,
        name: &str,
        content: &ContentSet,
        checksum: &str,
    ) -> RepositoryResult<DatasetInfo>;

    /// Fetch the content of a dataset.
    ///
    /// # Errors
    /// `NotFound` when no dataset has this id.
    async fn get_dataset(&self, dataset_id: DatasetId) -> RepositoryResult<Arc<ContentSet>>;

    async fn get_dataset_info(&self, dataset_id: DatasetId) -> RepositoryResult<DatasetInfo>;

    /// List all datasets, ordered by id.
    async fn list_datasets(&self) -> RepositoryResult<Vec<DatasetInfo>>;

    async fn find_by_checksum(&self, checksum: &str) -> RepositoryResult<Option<DatasetInfo>>;
}
