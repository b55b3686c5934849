//! Per-call side outcomes.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::SideError;

/// One of the two call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Control endpoint.
    A,
    /// Candidate endpoint.
    B,
}

impl Side {
    /// The opposite side.
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("a"),
            Side::B => f.write_str("b"),
        }
    }
}

/// Outcome of invoking one side: either a value or a failure, plus the
/// wall-clock time the call took (failures included).
#[derive(Debug)]
pub struct CallResult<T> {
    side: Side,
    outcome: Result<T, SideError>,
    duration: Duration,
}

impl<T> CallResult<T> {
    pub fn new(side: Side, outcome: Result<T, SideError>, duration: Duration) -> Self {
        Self {
            side,
            outcome,
            duration,
        }
    }

    /// Await `call` and capture its outcome and elapsed time.
    pub async fn measure<F>(side: Side, call: F) -> Self
    where
        F: Future<Output = Result<T, SideError>>,
    {
        let start = Instant::now();
        let outcome = call.await;
        Self::new(side, outcome, start.elapsed())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn value(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn failure(&self) -> Option<&SideError> {
        self.outcome.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn outcome(&self) -> &Result<T, SideError> {
        &self.outcome
    }

    pub fn into_outcome(self) -> Result<T, SideError> {
        self.outcome
    }
}
