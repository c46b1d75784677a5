//! Marker color classification.

use super::station::StationKind;

/// Stroke/fill pair applied to a rendered marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerColor {
    pub stroke: &'static str,
    pub fill: &'static str,
}

/// Colors for stations whose type is one of the known literals.
pub const HIGHLIGHT_COLOR: MarkerColor = MarkerColor {
    stroke: "#b33939",
    fill: "#e15f41",
};

/// Colors for everything else, including untyped stations.
pub const DEFAULT_COLOR: MarkerColor = MarkerColor {
    stroke: "#1e6091",
    fill: "#468faf",
};

/// Two-way classification: known station types get the highlight pair,
/// all other types (including absent and future ones) silently get the
/// default pair.
pub fn color_for(station_type: Option<&str>) -> MarkerColor {
    match station_type.and_then(StationKind::parse) {
        Some(_) => HIGHLIGHT_COLOR,
        None => DEFAULT_COLOR,
    }
}
