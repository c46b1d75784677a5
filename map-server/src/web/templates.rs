//! Askama templates for the web frontend.

use askama::Template;

use super::state::MapConfig;

/// Map page with filter controls and the search box.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub tile_url: String,
    pub attribution: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl IndexTemplate {
    /// Create from the configured map surface.
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            tile_url: config.tile_url.clone(),
            attribution: config.attribution.clone(),
            center_lat: config.center_lat,
            center_lng: config.center_lng,
            zoom: config.zoom,
        }
    }
}
