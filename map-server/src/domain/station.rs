//! Normalized station model.

use chrono::{DateTime, Utc};

use super::geo::LatLng;

/// Name used when a record carries no recognizable name field.
pub const FALLBACK_NAME: &str = "unknown station";

/// The four station types the UI knows how to hide.
///
/// Raw records carry the type as a free-form string; only these four
/// literals (compared trimmed and lower-cased) participate in filtering
/// and highlighting. Anything else is passed through untouched.
///
/// # Examples
///
/// ```
/// use map_server::domain::StationKind;
///
/// assert_eq!(StationKind::parse("Wash"), Some(StationKind::Wash));
/// assert_eq!(StationKind::parse(" chargingLocation "), Some(StationKind::ChargingLocation));
///
/// // Unknown literals never match
/// assert_eq!(StationKind::parse("depot"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKind {
    Wash,
    SelfService,
    Truck,
    ChargingLocation,
}

impl StationKind {
    /// Parse a raw type string.
    ///
    /// Comparison is exact string equality after trimming and
    /// lower-casing; anything outside the four known literals is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wash" => Some(StationKind::Wash),
            "selfservice" => Some(StationKind::SelfService),
            "truck" => Some(StationKind::Truck),
            "charginglocation" => Some(StationKind::ChargingLocation),
            _ => None,
        }
    }

    /// Canonical lower-case literal for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            StationKind::Wash => "wash",
            StationKind::SelfService => "selfservice",
            StationKind::Truck => "truck",
            StationKind::ChargingLocation => "charginglocation",
        }
    }
}

/// A station record after normalization.
///
/// Always best-effort: unusable fields degrade to their fallback rather
/// than rejecting the record. A station without coordinates stays in the
/// list (it may matter for future re-filtering) but is never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStation {
    /// Display name; never empty (falls back to [`FALLBACK_NAME`]).
    pub name: String,

    /// Both components finite, or absent as a pair.
    pub coordinates: Option<LatLng>,

    /// Display-only timestamp; defaults to the normalization time.
    pub last_updated: DateTime<Utc>,

    /// Raw station type string as the upstream sent it, if any.
    pub station_type: Option<String>,
}

impl NormalizedStation {
    /// The known kind of this station, if its type string matches one.
    pub fn kind(&self) -> Option<StationKind> {
        self.station_type.as_deref().and_then(StationKind::parse)
    }
}
