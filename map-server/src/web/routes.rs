//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tracing::warn;

use crate::geocode::GeocodeError;
use crate::proxy::ProxyResponse;
use crate::search::MIN_QUERY_LEN;
use crate::session::MapSession;
use crate::stations::{PayloadError, StationsError};

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Cache policy attached to every proxied response.
const CACHE_CONTROL_VALUE: &str = "public, max-age=60";

/// Geocode result cap when the client doesn't ask for one.
const DEFAULT_GEOCODE_LIMIT: usize = 8;

/// Hard cap on the geocode result count.
const MAX_GEOCODE_LIMIT: usize = 20;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(stations_proxy))
        .route("/api/geocode", get(geocode_proxy))
        .route("/api/map/markers", get(map_markers))
        .route("/api/map/locate", get(locate))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = IndexTemplate::from_config(&state.map)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

    Ok(Html(html))
}

/// Transparent proxy to the stations upstream.
///
/// Status and body are relayed verbatim; only transport failures map to
/// an error of our own.
async fn stations_proxy(State(state): State<AppState>) -> Result<Response, AppError> {
    let upstream = state.stations.fetch_raw().await?;
    Ok(relay(upstream))
}

/// Transparent proxy to the geocoding upstream.
///
/// Queries below the minimum length answer `200 []` immediately without
/// contacting the upstream.
async fn geocode_proxy(
    State(state): State<AppState>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Response, AppError> {
    let Some(term) = effective_term(req.q.as_deref()) else {
        return Ok(Json(Vec::<LocateResult>::new()).into_response());
    };

    let upstream = state.geocode.search_raw(term, clamp_limit(req.limit)).await?;
    Ok(relay(upstream))
}

/// Server-side run of the station pipeline: cached fetch → normalize →
/// filter → render, with the visible count the UI surfaces live.
async fn map_markers(
    State(state): State<AppState>,
    Query(query): Query<MarkerQuery>,
) -> Result<Json<MarkersResponse>, AppError> {
    let payload = state.stations_cache.fetch().await?;

    let mut session = MapSession::new();
    session.set_filter(query.filter_state());
    session.load_payload(&payload, Utc::now())?;

    let markers = session
        .markers()
        .markers()
        .iter()
        .map(MarkerView::from_marker)
        .collect();

    Ok(Json(MarkersResponse {
        markers,
        visible_count: session.visible_count(),
    }))
}

/// Typed geocode: defensively parsed hits with precomputed viewports.
async fn locate(
    State(state): State<AppState>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Json<LocateResponse>, AppError> {
    let Some(term) = effective_term(req.q.as_deref()) else {
        return Ok(Json(LocateResponse { results: vec![] }));
    };

    let hits = state.geocode.search(term, clamp_limit(req.limit)).await?;
    let results = hits.iter().map(LocateResult::from_result).collect();

    Ok(Json(LocateResponse { results }))
}

/// The trimmed search term, or `None` when it is too short to query.
fn effective_term(q: Option<&str>) -> Option<&str> {
    let term = q.map(str::trim).unwrap_or("");
    if term.chars().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(term)
    }
}

/// Clamp the caller's result cap into a sane range.
fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_GEOCODE_LIMIT).clamp(1, MAX_GEOCODE_LIMIT)
}

/// Turn a captured upstream response into our reply: status and body
/// verbatim, `content-type` defaulted when absent, cache policy always
/// added.
fn relay(upstream: ProxyResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let content_type = upstream
        .content_type
        .as_deref()
        .and_then(|value| HeaderValue::from_str(value).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );

    (status, headers, upstream.body).into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// An upstream call failed; `status` is the upstream status when one
    /// exists, 502 otherwise.
    Upstream { status: u16, message: String },
    Internal { message: String },
}

impl From<StationsError> for AppError {
    fn from(e: StationsError) -> Self {
        match e {
            StationsError::Upstream { status, message } => AppError::Upstream { status, message },
            other => AppError::Upstream {
                status: 502,
                message: other.to_string(),
            },
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::Upstream { status, message } => AppError::Upstream { status, message },
            other => AppError::Upstream {
                status: 502,
                message: other.to_string(),
            },
        }
    }
}

impl From<PayloadError> for AppError {
    fn from(e: PayloadError) -> Self {
        AppError::Upstream {
            status: 502,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Upstream { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
