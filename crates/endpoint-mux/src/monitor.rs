//! Observability hooks for validation outcomes.
//!
//! A [`Monitorable`] sees every verdict produced by a sampled call. Hooks
//! are fire-and-forget: an error or panic raised by a hook is logged and
//! swallowed, never reaching the caller of `route()`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::validators::ValidationResult;

/// Receives the verdict of each sampled call.
pub trait Monitorable: Send + Sync {
    fn on_result(&self, result: &ValidationResult) -> anyhow::Result<()>;
}

/// Ignores every verdict. Used when no monitor is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl Monitorable for NoopMonitor {
    fn on_result(&self, _result: &ValidationResult) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Logs every verdict: passes at `debug`, failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMonitor;

impl Monitorable for TracingMonitor {
    fn on_result(&self, result: &ValidationResult) -> anyhow::Result<()> {
        if result.passed() {
            tracing::debug!("Shadow comparison passed");
        } else {
            tracing::warn!(reason = %result.message(), "Shadow comparison failed");
        }
        Ok(())
    }
}

/// Invoke `monitor`, containing any error or panic it raises.
pub(crate) fn notify(monitor: &dyn Monitorable, result: &ValidationResult) {
    match catch_unwind(AssertUnwindSafe(|| monitor.on_result(result))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Monitor hook failed, ignoring");
        }
        Err(_) => {
            tracing::warn!("Monitor hook panicked, ignoring");
        }
    }
}
