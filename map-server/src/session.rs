//! Per-view map session state.
//!
//! The station list, filter flags and marker set live here as one
//! explicit value owned by the caller, with the pure pipeline functions
//! (normalize, filter, render) doing the work. A session lasts one page
//! view; nothing persists.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{NormalizedStation, TypeFilterState};
use crate::render::{MarkerSet, render};
use crate::stations::{PayloadError, normalize_payload};

/// State owner for one map view.
#[derive(Debug, Clone, Default)]
pub struct MapSession {
    stations: Vec<NormalizedStation>,
    filter: TypeFilterState,
    markers: MarkerSet,
}

impl MapSession {
    /// Fresh session: empty list, nothing hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a raw upstream payload into the session.
    ///
    /// On success the full station list (including records without
    /// usable coordinates) replaces the previous one and the markers are
    /// rebuilt; the number of loaded records is returned. A malformed
    /// payload is fatal for the load: the list is cleared and the error
    /// surfaced.
    pub fn load_payload(
        &mut self,
        payload: &Value,
        now: DateTime<Utc>,
    ) -> Result<usize, PayloadError> {
        match normalize_payload(payload, now) {
            Ok(stations) => {
                self.stations = stations;
                self.rebuild();
                Ok(self.stations.len())
            }
            Err(e) => {
                self.stations.clear();
                self.rebuild();
                Err(e)
            }
        }
    }

    /// Replace the filter flags and rebuild the marker set.
    pub fn set_filter(&mut self, filter: TypeFilterState) {
        self.filter = filter;
        self.rebuild();
    }

    /// Current filter flags.
    pub fn filter(&self) -> TypeFilterState {
        self.filter
    }

    /// The full normalized list, renderable or not.
    pub fn stations(&self) -> &[NormalizedStation] {
        &self.stations
    }

    /// The current marker set.
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// The live visible-station counter.
    pub fn visible_count(&self) -> usize {
        self.markers.visible_count()
    }

    fn rebuild(&mut self) {
        self.markers = render(&self.stations, &self.filter);
    }
}
