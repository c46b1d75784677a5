//! Debounced geocode search state machine.
//!
//! Deterministic over integer milliseconds: the caller supplies `now`,
//! so tests never sleep. Input edits restart a trailing-edge debounce
//! window; only the last edit inside the window produces a query. Every
//! issued query carries a monotonically increasing sequence number, and
//! a response is discarded unless it answers the newest issued query.
//! Superseded responses can never overwrite newer results, regardless
//! of arrival order.

use tracing::warn;

use crate::domain::SearchResult;

/// Quiet period before a query fires, in milliseconds.
pub const DEBOUNCE_MS: u64 = 300;

/// Minimum trimmed query length; anything shorter short-circuits.
pub const MIN_QUERY_LEN: usize = 2;

/// Where the search UI currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No usable input.
    #[default]
    Idle,
    /// Waiting out the debounce window.
    Debouncing,
    /// A query has been issued and not yet answered.
    Searching,
    /// Results are available.
    Listed,
    /// The newest query answered with zero usable results.
    NoResults,
    /// The newest query failed; degraded to an empty, closed list.
    Failed,
}

/// Keyboard events the result list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// A query the driver should send to the geocode proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    /// Sequence number to echo back into [`SearchMachine::on_results`].
    pub seq: u64,
    /// Trimmed search term.
    pub term: String,
}

/// The debounce/search/selection state machine.
#[derive(Debug, Clone, Default)]
pub struct SearchMachine {
    phase: SearchPhase,
    input: String,
    deadline: Option<u64>,
    latest_seq: u64,
    results: Vec<SearchResult>,
    active: usize,
    open: bool,
}

impl SearchMachine {
    /// Fresh machine in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input edit at time `now`.
    ///
    /// Input below the minimum length clears results and closes the
    /// list without ever contacting the proxy; otherwise the trailing
    /// debounce deadline restarts.
    pub fn on_input(&mut self, text: &str, now: u64) {
        self.input = text.trim().to_string();

        if self.input.chars().count() < MIN_QUERY_LEN {
            self.deadline = None;
            self.results.clear();
            self.active = 0;
            self.open = false;
            self.phase = SearchPhase::Idle;
            return;
        }

        self.deadline = Some(now + DEBOUNCE_MS);
        self.phase = SearchPhase::Debouncing;
    }

    /// Advance the debounce timer.
    ///
    /// Returns the query to issue once the quiet period has elapsed; at
    /// most one query fires per elapsed window. An already in-flight
    /// query is not cancelled; its response will simply lose the
    /// sequence-number check.
    pub fn poll(&mut self, now: u64) -> Option<PendingQuery> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        self.deadline = None;
        self.latest_seq += 1;
        self.phase = SearchPhase::Searching;

        Some(PendingQuery {
            seq: self.latest_seq,
            term: self.input.clone(),
        })
    }

    /// Feed the successful response for query `seq`.
    ///
    /// Responses to anything but the newest issued query are discarded.
    pub fn on_results(&mut self, seq: u64, results: Vec<SearchResult>) {
        if seq != self.latest_seq {
            warn!(seq, latest = self.latest_seq, "discarding superseded search response");
            return;
        }

        self.results = results;
        self.active = 0;

        if self.results.is_empty() {
            self.open = false;
            self.phase = SearchPhase::NoResults;
        } else {
            self.open = true;
            self.phase = SearchPhase::Listed;
        }
    }

    /// Feed a failure for query `seq`.
    ///
    /// Degrades to an empty, closed list; typing continues undisturbed.
    pub fn on_error(&mut self, seq: u64) {
        if seq != self.latest_seq {
            warn!(seq, latest = self.latest_seq, "discarding superseded search failure");
            return;
        }

        self.results.clear();
        self.active = 0;
        self.open = false;
        self.phase = SearchPhase::Failed;
    }

    /// React to a keyboard event over the result list.
    ///
    /// Arrow keys cycle the active index circularly; Enter commits and
    /// returns the active result; Escape closes the list but leaves the
    /// typed text alone. Events on a closed or empty list do nothing.
    pub fn on_key(&mut self, key: Key) -> Option<&SearchResult> {
        if !self.open || self.results.is_empty() {
            return None;
        }

        match key {
            Key::ArrowDown => {
                self.active = (self.active + 1) % self.results.len();
                None
            }
            Key::ArrowUp => {
                self.active = (self.active + self.results.len() - 1) % self.results.len();
                None
            }
            Key::Enter => {
                self.open = false;
                self.results.get(self.active)
            }
            Key::Escape => {
                self.open = false;
                None
            }
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// The typed text as last seen (trimmed).
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the result list is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Results of the newest answered query.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Index of the keyboard-active result.
    pub fn active_index(&self) -> usize {
        self.active
    }
}
