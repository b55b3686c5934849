//! Ordered criterion chain: the stock `ResultValidator`.

use crate::result::CallResult;

use super::{AcceptanceCriterion, ResultValidator, ValidationResult};

/// Runs acceptance criteria in insertion order, short-circuiting on the
/// first failure. An empty chain passes.
pub struct ChainValidator<T> {
    criteria: Vec<Box<dyn AcceptanceCriterion<T>>>,
}

impl<T> ChainValidator<T> {
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Append a criterion to the end of the chain.
    pub fn with(mut self, criterion: impl AcceptanceCriterion<T> + 'static) -> Self {
        self.criteria.push(Box::new(criterion));
        self
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl<T> Default for ChainValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<Box<dyn AcceptanceCriterion<T>>> for ChainValidator<T> {
    fn from_iter<I: IntoIterator<Item = Box<dyn AcceptanceCriterion<T>>>>(iter: I) -> Self {
        Self {
            criteria: iter.into_iter().collect(),
        }
    }
}

impl<T> ResultValidator<T> for ChainValidator<T> {
    fn validate(&self, a: &CallResult<T>, b: &CallResult<T>) -> ValidationResult {
        self.criteria
            .iter()
            .map(|criterion| criterion.check(a, b))
            .find(|verdict| !verdict.passed())
            .unwrap_or_else(ValidationResult::pass)
    }
}
