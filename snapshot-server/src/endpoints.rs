//! Contains all HTTP endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::ServiceState;

/// Builds the router with all API routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/snapshots/create", post(create_snapshot))
        .route("/api/v1/snapshots", get(list_snapshots))
        .route("/api/v1/snapshots/all", delete(delete_all_snapshots))
}

async fn health() -> impl IntoResponse {
    "OK"
}

#[derive(Debug, Serialize)]
struct CreateSnapshotResponse {
    success: bool,
    snapshot_path: String,
    uuid: String,
}

async fn create_snapshot(State(state): State<ServiceState>) -> ApiResult<impl IntoResponse> {
    let created = state.service().create_snapshot().await?;
    tracing::info!(path = %created.path, "snapshot created");

    Ok((
        StatusCode::CREATED,
        Json(CreateSnapshotResponse {
            success: true,
            snapshot_path: created.path,
            uuid: created.uuid.to_string(),
        }),
    ))
}

#[derive(Debug, Serialize)]
struct ListSnapshotsResponse {
    success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    snapshots: Vec<String>,
    count: usize,
}

async fn list_snapshots(State(state): State<ServiceState>) -> ApiResult<impl IntoResponse> {
    let snapshots = state.service().list_test_snapshots().await?;
    tracing::debug!(count = snapshots.len(), "listed test snapshots");

    Ok(Json(ListSnapshotsResponse {
        success: true,
        count: snapshots.len(),
        snapshots,
    }))
}

#[derive(Debug, Serialize)]
struct DeleteAllResponse {
    success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    deleted: Vec<String>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

/// Deletes all test snapshots.
///
/// A sweep where some deletions fail is reported as `206 Partial Content`,
/// still listing the successfully reclaimed paths. Only a failure of the
/// initial listing produces a `500`.
async fn delete_all_snapshots(State(state): State<ServiceState>) -> ApiResult<Response> {
    let outcome = state.service().delete_all_test_snapshots().await?;
    let count = outcome.deleted.len();

    if !outcome.is_complete() {
        let error_message = format!(
            "some snapshots could not be deleted: {}",
            outcome.failed.join(", ")
        );
        tracing::warn!(failed = outcome.failed.len(), deleted = count, "partial cleanup");

        let body = DeleteAllResponse {
            success: false,
            deleted: outcome.deleted,
            count,
            error_message: Some(error_message),
        };
        return Ok((StatusCode::PARTIAL_CONTENT, Json(body)).into_response());
    }

    tracing::info!(deleted = count, "cleanup complete");
    Ok(Json(DeleteAllResponse {
        success: true,
        deleted: outcome.deleted,
        count,
        error_message: None,
    })
    .into_response())
}
