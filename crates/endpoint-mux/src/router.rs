//! The endpoint router: mode dispatch, sampling, dual invocation and
//! validation.
//!
//! Per call:
//! - `a-side` / `b-side`: run that side inline and return its outcome.
//! - `shadow-*`: ask the routing criterion. On skip, behave like `a-side`.
//!   On sample, hand the shadow side to the executor, run the authoritative
//!   side inline, join both, validate, notify the monitor, and return the
//!   authoritative side's outcome (B for `shadow-active`, A for
//!   `shadow-passive`).
//!
//! The shadow side always runs on the executor, so a panic in it surfaces as
//! an abandoned call rather than unwinding through `route()`.
//!
//! Only the authoritative side's failure ever reaches the caller. There is
//! no fallback to the other side and no retry.

use std::future::Future;
use std::time::Instant;

use tokio::sync::oneshot;
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::error::{RoutingError, SideError};
use crate::mode::RoutingMode;
use crate::monitor;
use crate::result::{CallResult, Side};
use crate::routing::RoutingConfiguration;
use crate::stats::RouterStats;

/// Routes calls between side A and side B according to its configuration.
///
/// Stateless per call apart from the routing criterion's counter and the
/// stats counters, so one router can serve any number of concurrent callers.
pub struct EndpointRouter<T> {
    config: RoutingConfiguration<T>,
    stats: RouterStats,
}

impl<T: Send + 'static> EndpointRouter<T> {
    pub fn new(config: RoutingConfiguration<T>) -> Self {
        Self {
            config,
            stats: RouterStats::new(),
        }
    }

    pub fn mode(&self) -> RoutingMode {
        self.config.mode
    }

    pub fn stats(&self) -> &RouterStats {
        &self.stats
    }

    /// Route one call and return the authoritative side's value.
    ///
    /// Does not impose a deadline of its own: without a configured side
    /// timeout, a side that never completes makes this call never complete.
    pub async fn route(&self) -> Result<T, RoutingError> {
        let route_id = Uuid::new_v4();
        let span = mux_tracing::route_span!(route_id, self.config.mode);
        let start = Instant::now();

        async {
            self.stats.inc_routes();

            let result = match self.config.mode {
                RoutingMode::ASide => self.call_inline(Side::A, route_id).await,
                RoutingMode::BSide => self.call_inline(Side::B, route_id).await,
                mode => {
                    if self.config.criterion.should_sample() {
                        self.compare(mode.authoritative_side(), route_id).await
                    } else {
                        Span::current().record("sampled", false);
                        self.call_inline(Side::A, route_id).await
                    }
                }
            };

            Span::current().record("latency_ms", start.elapsed().as_millis() as u64);
            result
        }
        .instrument(span)
        .await
    }

    async fn call_inline(&self, side: Side, route_id: Uuid) -> Result<T, RoutingError> {
        settle(self.invoke(side, route_id).await)
    }

    /// Run both sides concurrently and return the `authoritative` one.
    async fn compare(&self, authoritative: Side, route_id: Uuid) -> Result<T, RoutingError> {
        Span::current().record("sampled", true);
        self.stats.inc_sampled();

        // Submit the shadow side before the authoritative one is polled so
        // both calls are in flight together.
        let shadow = authoritative.other();
        let (tx, rx) = oneshot::channel();
        let remote = self.invoke(shadow, route_id);
        self.config.executor.execute(Box::pin(async move {
            let _ = tx.send(remote.await);
        }));

        let submitted = Instant::now();
        let (primary, shadowed) = tokio::join!(self.invoke(authoritative, route_id), async {
            rx.await.unwrap_or_else(|_| {
                tracing::warn!(side = %shadow, "Shadow side task dropped before it completed");
                self.stats.record_side_failure(shadow);
                CallResult::new(shadow, Err(SideError::Abandoned), submitted.elapsed())
            })
        });
        let (result_a, result_b) = match authoritative {
            Side::A => (primary, shadowed),
            Side::B => (shadowed, primary),
        };

        let verdict = self.config.validator.validate(&result_a, &result_b);
        Span::current().record("passed", verdict.passed());
        self.stats.record_validation(verdict.passed());
        if !verdict.passed() {
            tracing::info!(
                reason = %verdict.message(),
                a_latency_ms = result_a.duration().as_millis() as u64,
                b_latency_ms = result_b.duration().as_millis() as u64,
                "Shadow validation failed"
            );
        }
        monitor::notify(self.config.monitor.as_ref(), &verdict);

        match authoritative {
            Side::A => settle(result_a),
            Side::B => settle(result_b),
        }
    }

    /// Build the future for one side call: timed, optionally bounded by the
    /// side deadline, and instrumented. Owns everything it touches so it can
    /// run on the executor.
    fn invoke(
        &self,
        side: Side,
        route_id: Uuid,
    ) -> impl Future<Output = CallResult<T>> + Send + 'static {
        let call = match side {
            Side::A => (self.config.side_a)(),
            Side::B => (self.config.side_b)(),
        };
        let deadline = self.config.side_timeout;
        let stats = self.stats.clone();
        let span = mux_tracing::side_call_span!(route_id, side);

        async move {
            let result = CallResult::measure(side, async move {
                match deadline {
                    Some(limit) => match tokio::time::timeout(limit, call).await {
                        Ok(outcome) => outcome.map_err(SideError::from),
                        Err(_) => Err(SideError::TimedOut(limit)),
                    },
                    None => call.await.map_err(SideError::from),
                }
            })
            .await;

            let latency = result.duration().as_millis() as u64;
            Span::current().record("latency_ms", latency);
            match result.failure() {
                None => {
                    Span::current().record("status", "ok");
                }
                Some(e) => {
                    Span::current().record("status", "error");
                    stats.record_side_failure(side);
                    tracing::warn!(error = %e, latency_ms = latency, "Side call failed");
                }
            }
            result
        }
        .instrument(span)
    }
}

fn settle<T>(result: CallResult<T>) -> Result<T, RoutingError> {
    let side = result.side();
    result
        .into_outcome()
        .map_err(|source| RoutingError::Side { side, source })
}
