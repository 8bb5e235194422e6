//! HTTP request handlers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Extension, Query},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use flag_common::{validate_name, FlagError};
use renderer::layout::BADGE_ICON_CODE;
use renderer::RenderAssets;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::metrics;
use crate::page::INDEX_HTML;
use crate::state::AppState;
use crate::throttle::cache_key;

/// JSON error body: `{"error": "..."}`.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<FlagError> for ApiError {
    fn from(err: FlagError) -> Self {
        let status =
            StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET / - Generator page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /generate?name= - Render (or reuse) the flag for a name
pub async fn generate_handler(
    Extension(state): Extension<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(params): Query<GenerateParams>,
) -> Result<Response, ApiError> {
    metrics::record_request();
    let client = client_id(&headers, connect_info.map(|ConnectInfo(addr)| addr));

    if !state.throttle.check_and_record(&client).await {
        metrics::record_rate_limited();
        warn!(client = %client, "Rate limit exceeded");
        return Err(FlagError::RateLimited.into());
    }

    let raw = params.name.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Invalid name"));
    }
    let name = validate_name(trimmed)?;

    let key = cache_key(name.as_str());
    let provider = Arc::clone(&state.assets);
    let renderer = state.renderer.clone();
    let runtime = tokio::runtime::Handle::current();
    let to_render = name.clone();

    let outcome = state
        .throttle
        .get_or_render(&key, move |target| {
            let assets = runtime.block_on(RenderAssets::resolve(provider.as_ref(), BADGE_ICON_CODE));
            let start = Instant::now();
            let result = renderer
                .render_to_file(&to_render, &assets, &target)
                .map_err(FlagError::from);
            metrics::record_render_duration(start.elapsed());
            result
        })
        .await
        .map_err(|e| {
            metrics::record_render_error();
            error!(name = %name, cache_key = %key, error = %e, "Flag generation failed");
            e
        })?;

    metrics::record_cache(outcome.is_hit());
    info!(
        name = %name,
        client = %client,
        cache_key = %key,
        cache_hit = outcome.is_hit(),
        "Serving flag"
    );

    let bytes = tokio::fs::read(outcome.path()).await.map_err(FlagError::from)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "flag-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}

/// Client identity: first `X-Forwarded-For` entry, else the peer IP.
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}
