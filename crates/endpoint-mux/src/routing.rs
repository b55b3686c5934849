//! Immutable routing configuration and its builder.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::criterion::RoutingCriterion;
use crate::error::ConfigError;
use crate::executor::{BoxFuture, Executor};
use crate::mode::RoutingMode;
use crate::monitor::{Monitorable, NoopMonitor};
use crate::validators::ResultValidator;

/// A zero-argument side call. Each invocation yields a fresh future.
pub type SideFn<T> = Arc<dyn Fn() -> BoxFuture<anyhow::Result<T>> + Send + Sync>;

/// Everything an `EndpointRouter` needs, assembled once and never mutated.
///
/// The executor is borrowed from the host application: dropping the
/// configuration does not shut it down.
pub struct RoutingConfiguration<T> {
    pub(crate) side_a: SideFn<T>,
    pub(crate) side_b: SideFn<T>,
    pub(crate) executor: Arc<dyn Executor>,
    pub(crate) validator: Arc<dyn ResultValidator<T>>,
    pub(crate) criterion: Arc<dyn RoutingCriterion>,
    pub(crate) monitor: Arc<dyn Monitorable>,
    pub(crate) mode: RoutingMode,
    pub(crate) side_timeout: Option<Duration>,
}

impl<T> RoutingConfiguration<T> {
    pub fn builder() -> RoutingConfigurationBuilder<T> {
        RoutingConfigurationBuilder::default()
    }

    pub fn mode(&self) -> RoutingMode {
        self.mode
    }

    pub fn side_timeout(&self) -> Option<Duration> {
        self.side_timeout
    }
}

/// Collects the collaborators of a [`RoutingConfiguration`].
///
/// Sides, executor, validator, criterion and mode are required; the monitor
/// defaults to [`NoopMonitor`] and side calls have no deadline by default.
pub struct RoutingConfigurationBuilder<T> {
    side_a: Option<SideFn<T>>,
    side_b: Option<SideFn<T>>,
    executor: Option<Arc<dyn Executor>>,
    validator: Option<Arc<dyn ResultValidator<T>>>,
    criterion: Option<Arc<dyn RoutingCriterion>>,
    monitor: Option<Arc<dyn Monitorable>>,
    mode: Option<RoutingMode>,
    side_timeout: Option<Duration>,
}

impl<T> Default for RoutingConfigurationBuilder<T> {
    fn default() -> Self {
        Self {
            side_a: None,
            side_b: None,
            executor: None,
            validator: None,
            criterion: None,
            monitor: None,
            mode: None,
            side_timeout: None,
        }
    }
}

fn side_fn<T, F, Fut>(call: F) -> SideFn<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    Arc::new(move || Box::pin(call()) as BoxFuture<anyhow::Result<T>>)
}

impl<T> RoutingConfigurationBuilder<T> {
    pub fn with_side_a<F, Fut>(mut self, call: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.side_a = Some(side_fn(call));
        self
    }

    pub fn with_side_b<F, Fut>(mut self, call: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.side_b = Some(side_fn(call));
        self
    }

    pub fn with_executor(mut self, executor: impl Executor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Share an executor with other configurations.
    pub fn with_shared_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_result_validator(mut self, validator: impl ResultValidator<T> + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Share a validator, e.g. to observe it from a test.
    pub fn with_shared_validator(mut self, validator: Arc<dyn ResultValidator<T>>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_routing_criterion(mut self, criterion: impl RoutingCriterion + 'static) -> Self {
        self.criterion = Some(Arc::new(criterion));
        self
    }

    pub fn with_shared_criterion(mut self, criterion: Arc<dyn RoutingCriterion>) -> Self {
        self.criterion = Some(criterion);
        self
    }

    pub fn with_monitorable(mut self, monitor: impl Monitorable + 'static) -> Self {
        self.monitor = Some(Arc::new(monitor));
        self
    }

    pub fn with_shared_monitorable(mut self, monitor: Arc<dyn Monitorable>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn with_routing_mode(mut self, mode: RoutingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Bound each side call; an expired call becomes a failed side result.
    pub fn with_side_timeout(mut self, timeout: Duration) -> Self {
        self.side_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<RoutingConfiguration<T>, ConfigError> {
        Ok(RoutingConfiguration {
            side_a: self.side_a.ok_or(ConfigError::MissingField("side_a"))?,
            side_b: self.side_b.ok_or(ConfigError::MissingField("side_b"))?,
            executor: self.executor.ok_or(ConfigError::MissingField("executor"))?,
            validator: self
                .validator
                .ok_or(ConfigError::MissingField("result_validator"))?,
            criterion: self
                .criterion
                .ok_or(ConfigError::MissingField("routing_criterion"))?,
            monitor: self.monitor.unwrap_or_else(|| Arc::new(NoopMonitor)),
            mode: self.mode.ok_or(ConfigError::MissingField("routing_mode"))?,
            side_timeout: self.side_timeout,
        })
    }
}
