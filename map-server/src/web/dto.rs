//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{SearchResult, TypeFilterState, Viewport};
use crate::render::Marker;

/// Query parameters shared by `/api/geocode` and `/api/map/locate`.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    /// Free-text search term.
    pub q: Option<String>,

    /// Result cap requested by the client.
    pub limit: Option<usize>,
}

/// Hide flags for `/api/map/markers`, one per known station type.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkerQuery {
    pub hide_wash: bool,
    pub hide_selfservice: bool,
    pub hide_truck: bool,
    pub hide_charging: bool,
}

impl MarkerQuery {
    /// Convert to the domain filter state.
    pub fn filter_state(&self) -> TypeFilterState {
        TypeFilterState {
            hide_wash: self.hide_wash,
            hide_selfservice: self.hide_selfservice,
            hide_truck: self.hide_truck,
            hide_charging: self.hide_charging,
        }
    }
}

/// One marker in the `/api/map/markers` response.
#[derive(Debug, Serialize)]
pub struct MarkerView {
    pub name: String,
    pub lat: f64,
    pub lng: f64,

    /// Raw type string as the upstream sent it.
    pub station_type: Option<String>,

    /// Classified color pair.
    pub stroke: &'static str,
    pub fill: &'static str,

    /// Display-only timestamp, RFC 3339.
    pub last_updated: String,
}

impl MarkerView {
    /// Create from a rendered marker.
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            name: marker.name.clone(),
            lat: marker.position.lat,
            lng: marker.position.lng,
            station_type: marker.station_type.clone(),
            stroke: marker.color.stroke,
            fill: marker.color.fill,
            last_updated: marker.last_updated.to_rfc3339(),
        }
    }
}

/// Response for `/api/map/markers`.
#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    /// Renderable stations after filtering.
    pub markers: Vec<MarkerView>,

    /// The live counter surfaced next to the filter controls.
    pub visible_count: usize,
}

/// Where the map should move for a selected result.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewportView {
    /// Fit these bounds (padding already applied).
    Fit {
        south: f64,
        north: f64,
        west: f64,
        east: f64,
    },
    /// Center on a point at a fixed zoom.
    Center { lat: f64, lon: f64, zoom: u8 },
}

impl From<Viewport> for ViewportView {
    fn from(viewport: Viewport) -> Self {
        match viewport {
            Viewport::Fit(bounds) => ViewportView::Fit {
                south: bounds.south,
                north: bounds.north,
                west: bounds.west,
                east: bounds.east,
            },
            Viewport::Center { lat, lon, zoom } => ViewportView::Center { lat, lon, zoom },
        }
    }
}

/// One hit in the `/api/map/locate` response.
#[derive(Debug, Serialize)]
pub struct LocateResult {
    pub display: String,
    pub lat: f64,
    pub lon: f64,

    /// Precomputed viewport so the map glue never re-derives it.
    pub viewport: ViewportView,
}

impl LocateResult {
    /// Create from a parsed search result.
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            display: result.display.clone(),
            lat: result.lat,
            lon: result.lon,
            viewport: Viewport::for_result(result).into(),
        }
    }
}

/// Response for `/api/map/locate`.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub results: Vec<LocateResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
