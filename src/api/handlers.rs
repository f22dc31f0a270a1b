//! HTTP API handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{ApiError, MessageResponse};
use crate::metrics::record_request;
use crate::page::{Page, Translations, TranslationService};
use crate::store::PageStore;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Translation business logic.
    pub service: TranslationService,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state over the given store, without metrics.
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self {
            service: TranslationService::new(store),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("metrics_enabled", &self.metrics.is_some())
            .finish()
    }
}

/// Query parameters of the fetch endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FetchQuery {
    /// Page name.
    pub page: Option<String>,
    /// Locale code.
    pub locale: Option<String>,
}

impl FetchQuery {
    /// Both parameters, if present and non-empty.
    fn required(&self) -> Option<(&str, &str)> {
        let page = self.page.as_deref().filter(|p| !p.is_empty())?;
        let locale = self.locale.as_deref().filter(|l| !l.is_empty())?;
        Some((page, locale))
    }
}

/// Body of the upsert endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct UpsertRequest {
    /// Page name.
    pub page: Option<String>,
    /// Translations to merge into the page.
    pub translations: Option<Translations>,
}

impl UpsertRequest {
    /// Page name and translations, if both are present.
    fn into_required(self) -> Option<(String, Translations)> {
        let page = self.page.filter(|p| !p.is_empty())?;
        Some((page, self.translations?))
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the store answered a ping.
    pub ready: bool,
    /// Store error, when not ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

const FETCH_REQUIRED: &str = "Page and locale are required";
const UPSERT_REQUIRED: &str = "Page and translations are required";

fn outcome<T>(result: &Result<T, ApiError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) if e.status() == StatusCode::BAD_REQUEST => "invalid",
        Err(e) if e.status() == StatusCode::NOT_FOUND => "not_found",
        Err(_) => "error",
    }
}

/// `GET /pages?page=&locale=` - key -> string view of a page in one locale.
pub async fn fetch_translations(
    State(state): State<AppState>,
    query: Result<Query<FetchQuery>, QueryRejection>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let result = fetch(&state, query).await;
    record_request("fetch", outcome(&result));
    result
}

async fn fetch(
    state: &AppState,
    query: Result<Query<FetchQuery>, QueryRejection>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        debug!("Rejected fetch query: {}", rejection.body_text());
        ApiError::bad_request(FETCH_REQUIRED).with_detail(rejection.body_text())
    })?;
    let (page, locale) = query
        .required()
        .ok_or_else(|| ApiError::bad_request(FETCH_REQUIRED))?;

    state
        .service
        .fetch_for_locale(page, locale)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Error fetching translations"))
}

/// `POST /pages` - merge translations into a page, creating it if needed.
pub async fn upsert_translations(
    State(state): State<AppState>,
    payload: Result<Json<UpsertRequest>, JsonRejection>,
) -> Result<Json<Page>, ApiError> {
    let result = upsert(&state, payload).await;
    record_request("upsert", outcome(&result));
    result
}

async fn upsert(
    state: &AppState,
    payload: Result<Json<UpsertRequest>, JsonRejection>,
) -> Result<Json<Page>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected upsert body: {}", rejection.body_text());
        ApiError::bad_request(UPSERT_REQUIRED).with_detail(rejection.body_text())
    })?;
    let (page, translations) = request
        .into_required()
        .ok_or_else(|| ApiError::bad_request(UPSERT_REQUIRED))?;

    state
        .service
        .upsert(&page, translations)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Error saving page translations"))
}

/// `DELETE /pages/:page` - remove a page.
pub async fn delete_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = match state.service.delete(&page).await {
        Ok(true) => Ok(Json(MessageResponse::new(format!(
            "Page {page} deleted successfully"
        )))),
        Ok(false) => Err(ApiError::not_found(format!("Page {page} not found"))),
        Err(e) => Err(ApiError::from_service(e, "Error deleting page")),
    };
    record_request("delete", outcome(&result));
    result
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if the store answers, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                error: None,
            }),
        ),
        Err(e) => {
            warn!("Store ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    ready: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Metrics handler - Prometheus text, or 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
