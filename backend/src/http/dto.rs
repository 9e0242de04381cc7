//! Data Transfer Objects for the HTTP API.
//!
//! Visualization DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    // Landing
    DatasetInfo,
    // Layout kernels
    HeatRequest, HeatResponse, IntervalInput, PackRowsRequest, ReduceRequest,
    // Map
    MapData,
    // Search
    SearchHit, SearchQuery,
    // Timeline
    TimelineLayout,
};
use crate::parsing::NormalizationReport;

/// Request body for uploading a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetRequest {
    /// Name for the dataset
    pub name: String,
    /// Raw content-store documents
    pub documents: Vec<serde_json::Value>,
}

/// Response for dataset creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetResponse {
    pub dataset: DatasetInfo,
    pub report: NormalizationReport,
    /// `false` when the upload matched an existing dataset
    pub created: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub database: String,
}

/// Dataset list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetInfo>,
    pub total: usize,
}
