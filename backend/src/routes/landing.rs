use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::DatasetId;
use crate::models::ContentCounts;

/// Stored dataset summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub dataset_id: DatasetId,
    pub name: String,
    /// SHA-256 of the normalized content; identical uploads share it.
    pub checksum: String,
    pub counts: ContentCounts,
    pub created_at: DateTime<Utc>,
}

pub const LIST_DATASETS: &str = "list_datasets";
pub const POST_DATASET: &str = "store_dataset";
pub const GET_DATASET: &str = "get_dataset";
