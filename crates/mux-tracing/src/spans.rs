//! Span builder helpers for endpoint-mux instrumentation.

/// Create a tracing span for one `route()` invocation.
///
/// Usage: `let span = route_span!(route_id, mode);`
///
/// Fields recorded later by the router:
/// - `sampled`: whether this call ran both sides
/// - `passed`: validation outcome (sampled calls only)
/// - `latency_ms`: total wall-clock time of the call
#[macro_export]
macro_rules! route_span {
    ($route_id:expr, $mode:expr) => {
        tracing::info_span!(
            "route",
            route_id = %$route_id,
            mode = %$mode,
            sampled = tracing::field::Empty,
            passed = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        )
    };
}

/// Create a tracing span for a single side invocation.
#[macro_export]
macro_rules! side_call_span {
    ($route_id:expr, $side:expr) => {
        tracing::info_span!(
            "side_call",
            route_id = %$route_id,
            side = %$side,
            status = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        )
    };
}
