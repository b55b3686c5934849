//! endpoint-mux probe: route a batch of GET calls through the shadow router
//! and report how the candidate compared against the control.

use std::time::Duration;

use endpoint_mux::config::MuxSettings;
use endpoint_mux::{
    BoundedExecutor, EndpointRouter, RoutingConfiguration, RoutingMode, TracingMonitor,
};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1).cloned())
        .or_else(|| args.get(1).filter(|a| !a.starts_with('-')).cloned())
        .or_else(|| std::env::var("MUX_CONFIG").ok())
        .unwrap_or_else(|| "endpoint-mux.toml".to_string());

    let mode_override = args
        .iter()
        .position(|a| a == "--mode")
        .and_then(|i| args.get(i + 1))
        .map(|m| m.parse::<RoutingMode>())
        .transpose()?;

    let mut settings = MuxSettings::load(&config_path)?;

    // CLI overrides take precedence over TOML and env vars
    if let Some(mode) = mode_override {
        settings.routing.mode = mode;
    }

    // Build the runtime before tracing: the tonic gRPC exporter needs a reactor
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let tracing_guard = mux_tracing::init_tracing(&settings.tracing);

        tracing::info!(
            config_path = %config_path,
            mode = %settings.routing.mode,
            a_url = %settings.sides.a_url,
            b_url = %settings.sides.b_url,
            sample_period = settings.routing.sample_period,
            otlp_export = tracing_guard.exporting(),
            "Starting endpoint-mux probe"
        );

        let result = run(settings).await;
        drop(tracing_guard);
        result
    })
}

async fn run(settings: MuxSettings) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.sides.timeout_secs))
        .build()?;

    let (client_a, a_url) = (client.clone(), settings.sides.a_url.clone());
    let (client_b, b_url) = (client, settings.sides.b_url.clone());

    let mut builder = RoutingConfiguration::builder()
        .with_side_a(move || fetch(client_a.clone(), a_url.clone()))
        .with_side_b(move || fetch(client_b.clone(), b_url.clone()))
        .with_executor(BoundedExecutor::current(settings.routing.max_concurrent))
        .with_result_validator(settings.routing.validator::<String>())
        .with_routing_criterion(settings.routing.criterion()?)
        .with_monitorable(TracingMonitor)
        .with_routing_mode(settings.routing.mode);
    if let Some(timeout) = settings.routing.side_timeout() {
        builder = builder.with_side_timeout(timeout);
    }
    let router = EndpointRouter::new(builder.build()?);

    let mut failures = 0u64;
    for _ in 0..settings.probe.requests {
        match router.route().await {
            Ok(body) => tracing::debug!(bytes = body.len(), "Route complete"),
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, side = %e.side(), "Route failed");
            }
        }
    }

    let snapshot = router.stats().snapshot();
    tracing::info!(
        requests = settings.probe.requests,
        failures = failures,
        sampled = snapshot.sampled,
        validations_failed = snapshot.validations_failed,
        "Probe finished"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

/// GET `url` and return the body; non-2xx statuses are failures.
async fn fetch(client: reqwest::Client, url: String) -> anyhow::Result<String> {
    let body = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}
