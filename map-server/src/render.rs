//! Marker rendering pipeline.
//!
//! Full-rebuild policy: every change to the station list or the filter
//! flags discards the marker set and rebuilds it from scratch. There is
//! no diffing; marker identity is recreated but the visible set and the
//! count are deterministic functions of the inputs.

use chrono::{DateTime, Utc};

use crate::domain::{
    LatLng, MarkerColor, NormalizedStation, TypeFilterState, color_for, passes_filter,
};

/// One station rendered on the map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub position: LatLng,
    pub color: MarkerColor,
    pub station_type: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// The rebuilt marker set for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    /// Markers in station-list order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The live counter surfaced to the user: stations with usable
    /// coordinates that pass the type filter.
    pub fn visible_count(&self) -> usize {
        self.markers.len()
    }
}

/// Rebuild the marker set from scratch.
///
/// Stations without coordinates are silently skipped and never counted;
/// the rest pass through the type filter and get their color pair.
pub fn render(stations: &[NormalizedStation], filter: &TypeFilterState) -> MarkerSet {
    let markers = stations
        .iter()
        .filter_map(|station| {
            let position = station.coordinates?;
            if !passes_filter(station, filter) {
                return None;
            }
            Some(Marker {
                name: station.name.clone(),
                position,
                color: color_for(station.station_type.as_deref()),
                station_type: station.station_type.clone(),
                last_updated: station.last_updated,
            })
        })
        .collect();

    MarkerSet { markers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_COLOR, HIGHLIGHT_COLOR};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn station(name: &str, coords: Option<(f64, f64)>, ty: Option<&str>) -> NormalizedStation {
        NormalizedStation {
            name: name.into(),
            coordinates: coords.and_then(|(lat, lng)| LatLng::new(lat, lng)),
            last_updated: now(),
            station_type: ty.map(str::to_string),
        }
    }

    #[test]
    fn stations_without_coordinates_are_skipped() {
        let stations = vec![
            station("A", Some((59.0, 10.0)), None),
            station("B", None, None),
        ];
        let set = render(&stations, &TypeFilterState::default());
        assert_eq!(set.visible_count(), 1);
        assert_eq!(set.markers()[0].name, "A");
    }

    #[test]
    fn filter_excludes_matching_types_from_count() {
        let stations = vec![
            station("A", Some((59.0, 10.0)), Some("Wash")),
            station("B", Some((59.1, 10.1)), Some("Truck")),
            station("C", Some((59.2, 10.2)), None),
        ];
        let filter = TypeFilterState {
            hide_wash: true,
            ..Default::default()
        };
        let set = render(&stations, &filter);
        assert_eq!(set.visible_count(), 2);
        assert!(set.markers().iter().all(|m| m.name != "A"));
    }

    #[test]
    fn markers_carry_classified_colors() {
        let stations = vec![
            station("Known", Some((59.0, 10.0)), Some("selfservice")),
            station("Unknown", Some((59.1, 10.1)), Some("depot")),
            station("Untyped", Some((59.2, 10.2)), None),
        ];
        let set = render(&stations, &TypeFilterState::default());
        assert_eq!(set.markers()[0].color, HIGHLIGHT_COLOR);
        assert_eq!(set.markers()[1].color, DEFAULT_COLOR);
        assert_eq!(set.markers()[2].color, DEFAULT_COLOR);
    }

    #[test]
    fn render_is_idempotent() {
        let stations = vec![
            station("A", Some((59.0, 10.0)), Some("Wash")),
            station("B", None, Some("Truck")),
            station("C", Some((59.2, 10.2)), Some("depot")),
        ];
        let filter = TypeFilterState {
            hide_truck: true,
            ..Default::default()
        };

        let first = render(&stations, &filter);
        let second = render(&stations, &filter);
        assert_eq!(first, second);
        assert_eq!(first.visible_count(), second.visible_count());
    }

    #[test]
    fn empty_input_renders_empty() {
        let set = render(&[], &TypeFilterState::default());
        assert_eq!(set.visible_count(), 0);
        assert!(set.markers().is_empty());
    }
}
