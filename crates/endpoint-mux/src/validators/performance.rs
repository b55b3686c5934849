//! Asymmetric latency check: flags the candidate only when it is slower.

use std::time::Duration;

use crate::result::CallResult;

use super::{AcceptanceCriterion, ValidationResult};

/// Flags side B when it is slower than side A by more than `max_deviance`.
///
/// Asymmetric: B being faster (or equally fast) always passes.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceAcceptance {
    max_deviance: Duration,
}

impl PerformanceAcceptance {
    pub fn new(max_deviance: Duration) -> Self {
        Self { max_deviance }
    }

    pub fn max_deviance(&self) -> Duration {
        self.max_deviance
    }
}

impl<T> AcceptanceCriterion<T> for PerformanceAcceptance {
    fn check(&self, a: &CallResult<T>, b: &CallResult<T>) -> ValidationResult {
        match b.duration().checked_sub(a.duration()) {
            Some(diff) if diff > self.max_deviance => ValidationResult::fail("too slow"),
            _ => ValidationResult::pass(),
        }
    }
}
