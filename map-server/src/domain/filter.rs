//! Type filtering for map display.

use super::station::{NormalizedStation, StationKind};

/// Which station types are currently hidden.
///
/// One independent flag per known type. The filter is allow-by-default:
/// a flag can only hide stations whose type string matches its literal
/// exactly (trimmed, case-insensitive); unknown or absent types are
/// never hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeFilterState {
    pub hide_wash: bool,
    pub hide_selfservice: bool,
    pub hide_truck: bool,
    pub hide_charging: bool,
}

impl TypeFilterState {
    /// Whether the flag for `kind` is on.
    fn hides(&self, kind: StationKind) -> bool {
        match kind {
            StationKind::Wash => self.hide_wash,
            StationKind::SelfService => self.hide_selfservice,
            StationKind::Truck => self.hide_truck,
            StationKind::ChargingLocation => self.hide_charging,
        }
    }
}

/// Whether a station is eligible for display under the given filter.
///
/// False iff the station's type matches a known literal whose hide flag
/// is on. Stations without a type always pass.
pub fn passes_filter(station: &NormalizedStation, filter: &TypeFilterState) -> bool {
    match station.kind() {
        Some(kind) => !filter.hides(kind),
        None => true,
    }
}
