//! REST API endpoints.
//!
//! Axum-based HTTP API serving the engagement reports: coach overview,
//! team, game, player, and single coaching point. Handlers resolve their
//! scope once at the boundary, fetch rows from storage, and hand the
//! in-memory collections to the pure `calculate` engine.

use axum::routing::get;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::StorageError;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    /// Any storage read failure aborts the report; partial data must
    /// never reach a response body.
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Drop physical duplicate rows, keeping the last occurrence per id.
///
/// The JSONL store is append-only; re-imports and acknowledgment upserts
/// produce repeated ids where the newest row is authoritative.
pub fn dedup_by_id<T, F>(items: Vec<T>, id_fn: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<T> = items
        .into_iter()
        .rev()
        .filter(|item| seen.insert(id_fn(item).to_string()))
        .collect();
    out.reverse();
    out
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/reports/overview", get(routes::reports::coach_overview))
        .route("/api/reports/team", get(routes::reports::team_report))
        .route("/api/reports/game", get(routes::reports::game_report))
        .route("/api/reports/player", get(routes::engagement::player_report))
        .route("/api/reports/point", get(routes::engagement::point_report))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        value: u32,
    }

    fn row(id: &str, value: u32) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_dedup_keeps_last_occurrence() {
        let rows = vec![row("a", 1), row("b", 2), row("a", 3)];
        let deduped = dedup_by_id(rows, |r| &r.id);
        assert_eq!(deduped.len(), 2);
        assert!(deduped.contains(&row("b", 2)));
        // The newest "a" row wins (acknowledgment upsert semantics).
        assert!(deduped.contains(&row("a", 3)));
        assert!(!deduped.contains(&row("a", 1)));
    }

    #[test]
    fn test_dedup_no_duplicates_is_identity() {
        let rows = vec![row("a", 1), row("b", 2)];
        let deduped = dedup_by_id(rows.clone(), |r| &r.id);
        assert_eq!(deduped, rows);
    }

    #[test]
    fn test_dedup_empty() {
        let deduped: Vec<Row> = dedup_by_id(vec![], |r| &r.id);
        assert!(deduped.is_empty());
    }

    #[test]
    fn test_api_error_codes() {
        let resp = ApiError::NotFound("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_error_maps_to_internal() {
        let err: ApiError =
            StorageError::InvalidPath("bad".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
