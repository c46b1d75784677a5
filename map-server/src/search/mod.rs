//! Debounced location search.
//!
//! The machine here is the canonical model of the search UI: trailing-
//! edge debounce, sequence-numbered queries with stale-response discard,
//! and circular keyboard navigation over the result list. The browser
//! glue in `static/app.js` mirrors its constants.

mod machine;

pub use machine::{DEBOUNCE_MS, Key, MIN_QUERY_LEN, PendingQuery, SearchMachine, SearchPhase};
