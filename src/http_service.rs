//! HTTP service implementation for Eggwatch
//!
//! This module implements the JSON REST API using axum. Handlers stay thin:
//! they parse transport-level input, delegate to the services, and rely on
//! the `IntoResponse` impl below to map application errors onto the HTTP
//! status + `{ "message": ... }` body shape.

use crate::error::AppError;
use crate::models::{PriceRecord, SearchResults, StoreDetails};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Error body returned for every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Query parameters for the price search endpoint.
///
/// Everything arrives untyped so validation failures name the offending
/// field instead of surfacing as a framework parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub zip_code: Option<String>,
    pub radius: Option<String>,
    pub egg_type: Option<String>,
}

/// Query parameters for store-scoped price endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EggTypeQuery {
    pub egg_type: Option<String>,
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Build the API router
pub fn router(state: Arc<crate::AppState>) -> Router {
    Router::new()
        .route("/api/prices", get(search_prices))
        .route("/api/stores/:store_id", get(get_store))
        .route("/api/stores/:store_id/prices", get(get_store_prices))
        .route("/api/health", get(health_check))
        .with_state(state)
}

/// GET /api/prices?zipCode=&radius=&eggType=
async fn search_prices(
    State(state): State<Arc<crate::AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state
        .search_service
        .search(
            params.zip_code.as_deref(),
            params.radius.as_deref(),
            params.egg_type.as_deref(),
        )
        .await?;
    Ok(Json(results))
}

/// GET /api/stores/:store_id
async fn get_store(
    State(state): State<Arc<crate::AppState>>,
    Path(store_id): Path<String>,
) -> Result<Json<StoreDetails>, AppError> {
    let store_id = parse_store_id(&store_id)?;
    let details = state.search_service.store_details(store_id).await?;
    Ok(Json(details))
}

/// GET /api/stores/:store_id/prices?eggType=
async fn get_store_prices(
    State(state): State<Arc<crate::AppState>>,
    Path(store_id): Path<String>,
    Query(params): Query<EggTypeQuery>,
) -> Result<Json<Vec<PriceRecord>>, AppError> {
    let store_id = parse_store_id(&store_id)?;
    let history = state
        .search_service
        .store_price_history(store_id, params.egg_type.as_deref())
        .await?;
    Ok(Json(history))
}

/// GET /api/health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Helper to parse a store id from a path segment
fn parse_store_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid storeId: {}", raw)))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg,
            AppError::Resolution(err) => err.to_string(),
            other => {
                // Log the detail; the caller only ever sees a generic message
                error!("Request failed: {:?}", other);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
