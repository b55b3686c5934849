//! Atomic router statistics counters.
//!
//! Lock-free counters for routed calls, sampled comparisons and side
//! failures. All atomics use `Relaxed` ordering: these are monotonic display
//! counters with no synchronization requirements.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::result::Side;

#[derive(Default)]
struct StatsInner {
    total_routes: AtomicU64,
    sampled: AtomicU64,
    validations_passed: AtomicU64,
    validations_failed: AtomicU64,
    side_a_failures: AtomicU64,
    side_b_failures: AtomicU64,
}

/// Thread-safe atomic router statistics. Cheap to clone (Arc).
#[derive(Clone, Default)]
pub struct RouterStats {
    inner: Arc<StatsInner>,
}

/// Snapshot of current stats values, serializable to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_routes: u64,
    pub sampled: u64,
    pub validations_passed: u64,
    pub validations_failed: u64,
    pub side_a_failures: u64,
    pub side_b_failures: u64,
}

impl RouterStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_routes(&self) {
        self.inner.total_routes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_sampled(&self) {
        self.inner.sampled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation(&self, passed: bool) {
        let counter = if passed {
            &self.inner.validations_passed
        } else {
            &self.inner.validations_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_side_failure(&self, side: Side) {
        let counter = match side {
            Side::A => &self.inner.side_a_failures,
            Side::B => &self.inner.side_b_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_routes: self.inner.total_routes.load(Ordering::Relaxed),
            sampled: self.inner.sampled.load(Ordering::Relaxed),
            validations_passed: self.inner.validations_passed.load(Ordering::Relaxed),
            validations_failed: self.inner.validations_failed.load(Ordering::Relaxed),
            side_a_failures: self.inner.side_a_failures.load(Ordering::Relaxed),
            side_b_failures: self.inner.side_b_failures.load(Ordering::Relaxed),
        }
    }
}
