//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::GeocodeClient;
use crate::stations::{CachedStationsClient, StationsClient};

/// Map surface configuration injected into the index page.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Raster tile URL template.
    pub tile_url: String,

    /// Attribution line the tile provider requires.
    pub attribution: String,

    /// Initial viewport.
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            center_lat: 59.91,
            center_lng: 10.75,
            zoom: 5,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Stations upstream, raw passthrough path.
    pub stations: StationsClient,

    /// Stations upstream, cached parsed path for the marker pipeline.
    pub stations_cache: Arc<CachedStationsClient>,

    /// Geocoding upstream.
    pub geocode: GeocodeClient,

    /// Index page map configuration.
    pub map: Arc<MapConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        stations: StationsClient,
        stations_cache: CachedStationsClient,
        geocode: GeocodeClient,
        map: MapConfig,
    ) -> Self {
        Self {
            stations,
            stations_cache: Arc::new(stations_cache),
            geocode,
            map: Arc::new(map),
        }
    }
}
