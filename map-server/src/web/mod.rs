//! Web layer for the station map.
//!
//! Provides the two proxy endpoints, the server-side marker pipeline,
//! the typed locate endpoint, and the index page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, MapConfig};
