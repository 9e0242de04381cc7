//! Service layer for dataset storage.
//!
//! These functions sit between callers (HTTP handlers, the server binary) and
//! any [`ContentRepository`]. They own the cross-cutting rules: names are
//! validated, content is checksummed after normalization, and identical
//! content is stored once.

use std::sync::Arc;

use serde_json::Value;

use super::checksum::content_checksum;
use super::repository::{ContentRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::api::{DatasetId, DatasetInfo};
use crate::models::ContentSet;
use crate::parsing::{normalize_documents, NormalizationReport};

/// Result of ingesting raw documents.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub dataset: DatasetInfo,
    pub report: NormalizationReport,
    /// `false` when identical content was already stored.
    pub created: bool,
}

pub async fn health_check(repo: &dyn ContentRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Store normalized content, deduplicated by checksum.
///
/// Returns the stored info and whether a new dataset was created.
pub async fn store_dataset(
    repo: &dyn ContentRepository,
    name: &str,
    content: &ContentSet,
) -> RepositoryResult<(DatasetInfo, bool)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation_with_context(
            "Dataset name must not be empty",
            ErrorContext::new("store_dataset").with_entity("dataset"),
        ));
    }
    if content.is_empty() {
        return Err(RepositoryError::validation_with_context(
            "Dataset has no usable records",
            ErrorContext::new("store_dataset")
                .with_entity("dataset")
                .with_details(format!("name={}", name)),
        ));
    }

    let checksum = content_checksum(content)?;
    if let Some(existing) = repo.find_by_checksum(&checksum).await? {
        log::info!(
            "Dataset '{}' matches existing dataset {} (checksum {})",
            name,
            existing.dataset_id,
            &checksum[..12]
        );
        return Ok((existing, false));
    }

    let info = repo.store_dataset(name, content, &checksum).await?;
    log::info!(
        "Stored dataset {} '{}': {} macros, {} movements, {} works, {} figures",
        info.dataset_id,
        info.name,
        info.counts.macros,
        info.counts.movements,
        info.counts.works,
        info.counts.figures
    );
    Ok((info, true))
}

/// Normalize raw content-store documents and store the result.
pub async fn ingest_documents(
    repo: &dyn ContentRepository,
    name: &str,
    documents: &[Value],
) -> RepositoryResult<IngestOutcome> {
    let normalized = normalize_documents(documents);
    if !normalized.report.skipped.is_empty() {
        log::warn!(
            "Skipped {} of {} documents while ingesting '{}'",
            normalized.report.skipped.len(),
            normalized.report.input_count,
            name
        );
    }

    let (dataset, created) = store_dataset(repo, name, &normalized.content).await?;
    Ok(IngestOutcome {
        dataset,
        report: normalized.report,
        created,
    })
}

pub async fn list_datasets(repo: &dyn ContentRepository) -> RepositoryResult<Vec<DatasetInfo>> {
    repo.list_datasets().await
}

pub async fn get_dataset(
    repo: &dyn ContentRepository,
    dataset_id: DatasetId,
) -> RepositoryResult<Arc<ContentSet>> {
    repo.get_dataset(dataset_id).await
}

pub async fn get_dataset_info(
    repo: &dyn ContentRepository,
    dataset_id: DatasetId,
) -> RepositoryResult<DatasetInfo> {
    repo.get_dataset_info(dataset_id).await
}
