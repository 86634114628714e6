//! Shared metric state.
//!
//! One `MetricStore` lives for the whole process and is shared by every push
//! and pull. Writers take the write lock once per batch so a concurrent reader
//! sees either none or all of a batch's effects.

use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::RwLock;

use crate::quantity::{TokenType, Update};

/// Latest known value of every tracked quantity. Nothing is ever absent:
/// before the first push every value is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricState {
    tokens: [i64; 4],
    cost_usd: f64,
    last_update: DateTime<Local>,
}

impl MetricState {
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Zeroed state with an explicit start time.
    pub fn at(started: DateTime<Local>) -> Self {
        Self {
            tokens: [0; 4],
            cost_usd: 0.0,
            last_update: started,
        }
    }

    pub fn tokens(&self, t: TokenType) -> i64 {
        self.tokens[t.index()]
    }

    pub fn cost_usd(&self) -> f64 {
        self.cost_usd
    }

    pub fn last_update(&self) -> DateTime<Local> {
        self.last_update
    }

    fn apply(&mut self, u: Update) {
        match u {
            Update::Tokens(t, v) => self.tokens[t.index()] = v,
            Update::Cost(v) => self.cost_usd = v,
        }
    }
}

impl Default for MetricState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to the process-wide state.
#[derive(Debug, Clone, Default)]
pub struct MetricStore {
    inner: Arc<RwLock<MetricState>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle around an existing state (e.g. one built with `MetricState::at`).
    pub fn from_state(state: MetricState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Consistent copy of the current state.
    pub fn read(&self) -> MetricState {
        self.inner.read().clone()
    }

    /// Apply `updates` in order under a single write lock, then stamp
    /// `last_update`. The clock is read while the lock is held, so stamps
    /// follow lock order. Returns the stamp.
    pub fn commit(&self, updates: &[Update]) -> DateTime<Local> {
        let mut state = self.inner.write();
        for u in updates {
            state.apply(*u);
        }
        let now = Local::now();
        state.last_update = now;
        now
    }
}
