//! In-memory repository for local development and tests.
//!
//! Datasets live in a `BTreeMap` behind a `parking_lot::RwLock`. Locks are
//! taken and released inside each call; nothing is held across `.await`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::api::{DatasetId, DatasetInfo};
use crate::db::repository::{ContentRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::ContentSet;

#[derive(Debug)]
struct StoredDataset {
    info: DatasetInfo,
    content: Arc<ContentSet>,
}

/// In-memory [`ContentRepository`].
#[derive(Debug)]
pub struct LocalRepository {
    datasets: RwLock<BTreeMap<DatasetId, StoredDataset>>,
    next_id: AtomicI64,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            datasets: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        self.datasets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.read().is_empty()
    }

    /// Synchronous form of [`ContentRepository::store_dataset`], used when
    /// preloading snapshots outside an async context.
    pub fn insert(
        &self,
        name: &str,
        content: &ContentSet,
        checksum: &str,
    ) -> RepositoryResult<DatasetInfo> {
        if checksum.trim().is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Dataset checksum must not be empty",
                ErrorContext::new("store_dataset").with_entity("dataset"),
            ));
        }

        // Check and insert under one write lock so concurrent identical
        // uploads cannot both insert.
        let mut datasets = self.datasets.write();
        if let Some(existing) = datasets.values().find(|d| d.info.checksum == checksum) {
            return Ok(existing.info.clone());
        }

        let dataset_id = DatasetId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let info = DatasetInfo {
            dataset_id,
            name: name.to_string(),
            checksum: checksum.to_string(),
            counts: content.counts(),
            created_at: Utc::now(),
        };
        datasets.insert(
            dataset_id,
            StoredDataset {
                info: info.clone(),
                content: Arc::new(content.clone()),
            },
        );
        Ok(info)
    }

    fn not_found(operation: &str, dataset_id: DatasetId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Dataset {} not found", dataset_id),
            ErrorContext::new(operation)
                .with_entity("dataset")
                .with_entity_id(dataset_id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn store_dataset(
        &self,
        name: &str,
        content: &ContentSet,
        checksum: &str,
    ) -> RepositoryResult<DatasetInfo> {
        self.insert(name, content, checksum)
    }

    async fn get_dataset(&self, dataset_id: DatasetId) -> RepositoryResult<Arc<ContentSet>> {
        self.datasets
            .read()
            .get(&dataset_id)
            .map(|d| Arc::clone(&d.content))
            .ok_or_else(|| Self::not_found("get_dataset", dataset_id))
    }

    async fn get_dataset_info(&self, dataset_id: DatasetId) -> RepositoryResult<DatasetInfo> {
        self.datasets
            .read()
            .get(&dataset_id)
            .map(|d| d.info.clone())
            .ok_or_else(|| Self::not_found("get_dataset_info", dataset_id))
    }

    async fn list_datasets(&self) -> RepositoryResult<Vec<DatasetInfo>> {
        Ok(self
            .datasets
            .read()
            .values()
            .map(|d| d.info.clone())
            .collect())
    }

    async fn find_by_checksum(&self, checksum: &str) -> RepositoryResult<Option<DatasetInfo>> {
        Ok(self
            .datasets
            .read()
            .values()
            .find(|d| d.info.checksum == checksum)
            .map(|d| d.info.clone()))
    }
}
