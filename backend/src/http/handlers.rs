//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateDatasetRequest, CreateDatasetResponse, DatasetListResponse, HealthResponse,
    HeatRequest, HeatResponse, PackRowsRequest, ReduceRequest, SearchQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::algorithms::{aggregate_heat_buckets, pack_rows_with_fallback, HeatPoint, RowAssignment};
use crate::api::{DatasetId, MapData, SearchHit, TimelineLayout};
use crate::db::services as db_services;
use crate::models::ContentSet;
use crate::routes::search::MAX_SEARCH_LIMIT;
use crate::services;
use crate::state::{reduce, ViewState};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository is usable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Datasets
// =============================================================================

/// GET /v1/datasets
pub async fn list_datasets(State(state): State<AppState>) -> HandlerResult<DatasetListResponse> {
    let datasets = db_services::list_datasets(state.repository.as_ref()).await?;
    let total = datasets.len();
    Ok(Json(DatasetListResponse { datasets, total }))
}

/// POST /v1/datasets
///
/// Normalize and store raw documents. Responds 201 for a new dataset and 200
/// when the content matched an existing one.
pub async fn create_dataset(
    State(state): State<AppState>,
    Json(request): Json<CreateDatasetRequest>,
) -> Result<(StatusCode, Json<CreateDatasetResponse>), AppError> {
    if request.documents.is_empty() {
        return Err(AppError::BadRequest(
            "Request must contain at least one document".to_string(),
        ));
    }

    let outcome =
        db_services::ingest_documents(state.repository.as_ref(), &request.name, &request.documents)
            .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(CreateDatasetResponse {
            dataset: outcome.dataset,
            report: outcome.report,
            created: outcome.created,
        }),
    ))
}

/// GET /v1/datasets/{dataset_id}
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
) -> HandlerResult<ContentSet> {
    let content = db_services::get_dataset(state.repository.as_ref(), DatasetId::new(dataset_id)).await?;
    Ok(Json(content.as_ref().clone()))
}

// =============================================================================
// View Endpoints
// =============================================================================

/// POST /v1/datasets/{dataset_id}/timeline
///
/// Body is a `ViewState`; missing fields take their defaults.
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Json(view): Json<ViewState>,
) -> HandlerResult<TimelineLayout> {
    let content = db_services::get_dataset(state.repository.as_ref(), DatasetId::new(dataset_id)).await?;
    Ok(Json(services::compute_timeline_layout(
        &content,
        &view,
        &state.layout,
    )))
}

/// POST /v1/datasets/{dataset_id}/map
pub async fn get_map(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Json(view): Json<ViewState>,
) -> HandlerResult<MapData> {
    let content = db_services::get_dataset(state.repository.as_ref(), DatasetId::new(dataset_id)).await?;
    Ok(Json(services::compute_map_data(
        &content,
        &view,
        &state.gazetteer,
    )))
}

/// GET /v1/datasets/{dataset_id}/search?q=&limit=
pub async fn search_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<Vec<SearchHit>> {
    if query.limit > MAX_SEARCH_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be at most {}",
            MAX_SEARCH_LIMIT
        )));
    }
    let content = db_services::get_dataset(state.repository.as_ref(), DatasetId::new(dataset_id)).await?;
    Ok(Json(services::search(&content, &query.q, query.limit)))
}

// =============================================================================
// Stateless Kernels
// =============================================================================

/// POST /v1/layout/pack-rows
///
/// Missing or `null` bounds resolve through `Interval::from_optional` with the
/// request's `fallback`.
pub async fn pack_rows_handler(Json(request): Json<PackRowsRequest>) -> HandlerResult<RowAssignment> {
    let intervals = request.intervals();
    Ok(Json(pack_rows_with_fallback(
        &intervals,
        request.gap,
        request.fallback,
    )))
}

/// POST /v1/layout/heat
pub async fn heat_handler(
    State(state): State<AppState>,
    Json(request): Json<HeatRequest>,
) -> HandlerResult<HeatResponse> {
    let (buckets, summary) = aggregate_heat_buckets(&request.points, &state.gazetteer);
    Ok(Json(HeatResponse {
        points: buckets.iter().map(HeatPoint::from).collect(),
        summary,
    }))
}

/// POST /v1/view-state/reduce
pub async fn reduce_view_state(Json(request): Json<ReduceRequest>) -> HandlerResult<ViewState> {
    Ok(Json(reduce(request.state, request.action)))
}
