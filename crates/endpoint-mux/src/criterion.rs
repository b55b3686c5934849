//! Sampling criteria: decide per call whether to run a shadow comparison.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ConfigError;

/// Decides, once per shadow-mode `route()` call, whether both sides run.
pub trait RoutingCriterion: Send + Sync {
    fn should_sample(&self) -> bool;
}

/// Samples exactly one call out of every `period` consecutive calls,
/// starting with the first.
///
/// The counter is shared by every caller of the owning router. `fetch_add`
/// hands each call a distinct counter value, so no two calls can claim the
/// same sample slot.
#[derive(Debug)]
pub struct CountingCriterion {
    period: u64,
    counter: AtomicU64,
}

impl CountingCriterion {
    pub fn new(period: u64) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::InvalidSamplePeriod);
        }
        Ok(Self {
            period,
            counter: AtomicU64::new(0),
        })
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// Number of decisions taken so far.
    pub fn calls(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl RoutingCriterion for CountingCriterion {
    fn should_sample(&self) -> bool {
        self.counter.fetch_add(1, Ordering::Relaxed) % self.period == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            CountingCriterion::new(0).unwrap_err(),
            ConfigError::InvalidSamplePeriod
        );
    }

    #[test]
    fn test_period_one_always_samples() {
        let criterion = CountingCriterion::new(1).unwrap();
        assert!((0..10).all(|_| criterion.should_sample()));
    }

    #[test]
    fn test_exactly_one_sample_per_period() {
        let criterion = CountingCriterion::new(4).unwrap();
        let decisions: Vec<bool> = (0..12).map(|_| criterion.should_sample()).collect();

        for window in decisions.chunks(4) {
            assert_eq!(window.iter().filter(|&&sampled| sampled).count(), 1);
        }
        assert!(decisions[0]);
        assert!(decisions[4]);
        assert_eq!(criterion.calls(), 12);
    }

    #[test]
    fn test_concurrent_callers_share_slots() {
        let criterion = Arc::new(CountingCriterion::new(5).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let criterion = criterion.clone();
                std::thread::spawn(move || {
                    (0..250).filter(|_| criterion.should_sample()).count()
                })
            })
            .collect();

        let sampled: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(sampled, 2000 / 5);
        assert_eq!(criterion.calls(), 2000);
    }
}
