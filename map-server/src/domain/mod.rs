//! Domain types for the station map.
//!
//! Pure model types with no I/O: validated coordinates, the normalized
//! station record, the type filter, and marker colors. Everything here
//! can be constructed from literals in tests.

mod color;
mod filter;
mod geo;
mod station;

pub use color::{DEFAULT_COLOR, HIGHLIGHT_COLOR, MarkerColor, color_for};
pub use filter::{TypeFilterState, passes_filter};
pub use geo::{BBOX_PADDING_FRACTION, BoundingBox, LatLng, POINT_ZOOM, SearchResult, Viewport};
pub use station::{FALLBACK_NAME, NormalizedStation, StationKind};
