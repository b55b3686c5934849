//! Value equality between the two sides.

use crate::result::CallResult;

use super::{AcceptanceCriterion, ValidationResult};

/// Passes when both sides produced equal values.
///
/// A failure never equals a value. Two failures are treated as matching
/// behavior; the failures themselves are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsAcceptance;

impl<T: PartialEq> AcceptanceCriterion<T> for EqualsAcceptance {
    fn check(&self, a: &CallResult<T>, b: &CallResult<T>) -> ValidationResult {
        match (a.value(), b.value()) {
            (Some(va), Some(vb)) if va == vb => ValidationResult::pass(),
            (Some(_), Some(_)) => ValidationResult::fail("values do not match"),
            (None, None) => ValidationResult::pass(),
            (Some(_), None) => ValidationResult::fail("side b failed while side a succeeded"),
            (None, Some(_)) => ValidationResult::fail("side a failed while side b succeeded"),
        }
    }
}
