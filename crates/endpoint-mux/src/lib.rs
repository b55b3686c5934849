//! endpoint-mux: shadow-test a candidate endpoint against a control.
//!
//! An [`EndpointRouter`] invokes side A (control) and/or side B (candidate)
//! according to its [`RoutingMode`]. In the shadow modes a
//! [`RoutingCriterion`] samples calls; sampled calls run both sides
//! concurrently, compare the results with a [`ResultValidator`], report the
//! verdict to a [`Monitorable`], and return the authoritative side's value.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use endpoint_mux::{
//!     must_equal, CountingCriterion, EndpointRouter, RoutingConfiguration, RoutingMode,
//! };
//!
//! let config = RoutingConfiguration::builder()
//!     .with_side_a(|| async { Ok("control".to_string()) })
//!     .with_side_b(|| async { Ok("candidate".to_string()) })
//!     .with_executor(tokio::runtime::Handle::current())
//!     .with_result_validator(must_equal())
//!     .with_routing_criterion(CountingCriterion::new(10)?)
//!     .with_routing_mode(RoutingMode::ShadowPassive)
//!     .build()?;
//!
//! let router = EndpointRouter::new(config);
//! let _answer = router.route().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod criterion;
pub mod error;
pub mod executor;
pub mod mode;
pub mod monitor;
pub mod result;
pub mod router;
pub mod routing;
pub mod stats;
pub mod validators;

pub use criterion::{CountingCriterion, RoutingCriterion};
pub use error::{ConfigError, RoutingError, SideError};
pub use executor::{BoundedExecutor, BoxFuture, Executor};
pub use mode::RoutingMode;
pub use monitor::{Monitorable, NoopMonitor, TracingMonitor};
pub use result::{CallResult, Side};
pub use router::EndpointRouter;
pub use routing::{RoutingConfiguration, RoutingConfigurationBuilder, SideFn};
pub use stats::{RouterStats, StatsSnapshot};
pub use validators::{
    must_equal, within, AcceptanceCriterion, ChainValidator, EqualsAcceptance,
    PerformanceAcceptance, ResultValidator, ValidationResult,
};
