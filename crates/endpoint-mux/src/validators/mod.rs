//! Result validation: acceptance criteria and the validators that run them.
//!
//! An [`AcceptanceCriterion`] compares one aspect of the two sides' results.
//! A [`ResultValidator`] turns a pair of results into a single verdict; the
//! stock [`ChainValidator`] runs criteria in order and stops at the first
//! failure. Validation never raises: a mismatch is a `ValidationResult` with
//! `passed == false`.

mod chain;
mod equals;
mod performance;

use std::time::Duration;

use serde::Serialize;

use crate::result::CallResult;

pub use chain::ChainValidator;
pub use equals::EqualsAcceptance;
pub use performance::PerformanceAcceptance;

/// Verdict of comparing side A with side B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    passed: bool,
    message: String,
}

impl ValidationResult {
    pub fn new(passed: bool, message: impl Into<String>) -> Self {
        Self {
            passed,
            message: message.into(),
        }
    }

    pub fn pass() -> Self {
        Self::new(true, "")
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Compares one aspect of two side results. Implementations hold only their
/// construction parameters.
pub trait AcceptanceCriterion<T>: Send + Sync {
    fn check(&self, a: &CallResult<T>, b: &CallResult<T>) -> ValidationResult;
}

/// Produces the verdict for a sampled call. Shared by every concurrent
/// `route()` on the same configuration.
pub trait ResultValidator<T>: Send + Sync {
    fn validate(&self, a: &CallResult<T>, b: &CallResult<T>) -> ValidationResult;
}

impl<T, F> ResultValidator<T> for F
where
    F: Fn(&CallResult<T>, &CallResult<T>) -> ValidationResult + Send + Sync,
{
    fn validate(&self, a: &CallResult<T>, b: &CallResult<T>) -> ValidationResult {
        self(a, b)
    }
}

/// Validator that requires both sides to produce equal values.
pub fn must_equal<T>() -> ChainValidator<T>
where
    T: PartialEq + 'static,
{
    ChainValidator::new().with(EqualsAcceptance)
}

/// Validator that requires side B to be no more than `max_deviance` slower
/// than side A.
pub fn within<T: 'static>(max_deviance: Duration) -> ChainValidator<T> {
    ChainValidator::new().with(PerformanceAcceptance::new(max_deviance))
}


#[cfg(test)]
mod tests {
    use super::testing::ok;
    use super::*;
    use crate::result::Side;

    #[test]
    fn test_closure_is_a_validator() {
        let always =
            |_: &CallResult<String>, _: &CallResult<String>| ValidationResult::new(true, "N/A");
        let verdict = always.validate(
            &ok(Side::A, "abc".to_string(), 1),
            &ok(Side::B, "dbc".to_string(), 1),
        );
        assert!(verdict.passed());
        assert_eq!(verdict.message(), "N/A");
    }

    #[test]
    fn test_must_equal_factory() {
        let validator = must_equal::<String>();
        let a = ok(Side::A, "abc".to_string(), 1);
        assert!(validator.validate(&a, &ok(Side::B, "abc".to_string(), 1)).passed());
        assert!(!validator.validate(&a, &ok(Side::B, "abd".to_string(), 1)).passed());
    }

    #[test]
    fn test_within_factory() {
        let validator = within::<u32>(Duration::from_millis(50));
        let a = ok(Side::A, 1, 100);
        assert!(validator.validate(&a, &ok(Side::B, 2, 150)).passed());
        assert_eq!(
            validator.validate(&a, &ok(Side::B, 1, 151)).message(),
            "too slow"
        );
    }
}
