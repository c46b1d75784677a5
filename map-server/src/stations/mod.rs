//! Stations upstream client and normalization.
//!
//! The upstream is an uncontrolled third party: its payload is treated
//! as an untyped JSON tree at the boundary and validated field-by-field
//! by the normalizer. Two access paths exist: a raw fetch for the
//! pass-through proxy endpoint and a cached, parsed fetch for the
//! server-side marker pipeline.

mod cache;
mod client;
mod error;
mod normalize;

pub use cache::{CacheConfig, CachedStationsClient};
pub use client::{StationsClient, StationsConfig};
pub use error::StationsError;
pub use normalize::{PayloadError, normalize, normalize_payload};
