//! Error types for side calls, routing and configuration.

use std::time::Duration;

use thiserror::Error;

use crate::result::Side;

/// A side callable did not produce a value.
#[derive(Debug, Error)]
pub enum SideError {
    /// The callable itself returned an error.
    #[error("side call failed: {0:#}")]
    Failed(#[from] anyhow::Error),

    /// The configured side deadline elapsed first.
    #[error("side call exceeded its deadline of {0:?}")]
    TimedOut(Duration),

    /// The executor dropped the task before it reported a result.
    #[error("side task was dropped by the executor before completing")]
    Abandoned,
}

/// Returned by `EndpointRouter::route` when the authoritative side failed.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("authoritative side {side} failed")]
    Side {
        side: Side,
        #[source]
        source: SideError,
    },
}

impl RoutingError {
    /// The side whose failure was propagated.
    pub fn side(&self) -> Side {
        match self {
            RoutingError::Side { side, .. } => *side,
        }
    }
}

/// Invalid or incomplete routing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("routing configuration is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("sample period must be at least 1")]
    InvalidSamplePeriod,
}
