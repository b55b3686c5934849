//! Configuration types and loading logic.

use std::time::Duration;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use mux_tracing::TracingConfig;
use serde::Deserialize;

use crate::criterion::CountingCriterion;
use crate::error::ConfigError;
use crate::mode::RoutingMode;
use crate::validators::{ChainValidator, EqualsAcceptance, PerformanceAcceptance};

/// Top-level settings for the `endpoint-mux` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct MuxSettings {
    #[serde(default)]
    pub routing: RoutingSettings,
    pub sides: SidesSettings,
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// How calls are routed and compared.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingSettings {
    #[serde(default = "default_mode")]
    pub mode: RoutingMode,

    /// One call out of every `sample_period` runs both sides.
    #[serde(default = "default_sample_period")]
    pub sample_period: u64,

    /// Tolerated extra latency of side B over side A, in milliseconds.
    #[serde(default = "default_max_deviance_ms")]
    pub max_deviance_ms: u64,

    /// Optional deadline for each side call. Unset means no deadline.
    #[serde(default)]
    pub side_timeout_ms: Option<u64>,

    /// Upper bound on in-flight shadow tasks.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

/// Side endpoints probed by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct SidesSettings {
    pub a_url: String,
    pub b_url: String,

    #[serde(default = "default_side_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    #[serde(default = "default_requests")]
    pub requests: u64,
}

fn default_mode() -> RoutingMode {
    RoutingMode::ShadowPassive
}

fn default_sample_period() -> u64 {
    10
}

fn default_max_deviance_ms() -> u64 {
    250
}

fn default_max_concurrent() -> usize {
    50
}

fn default_side_timeout_secs() -> u64 {
    30
}

fn default_requests() -> u64 {
    100
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            sample_period: default_sample_period(),
            max_deviance_ms: default_max_deviance_ms(),
            side_timeout_ms: None,
            max_concurrent: default_max_concurrent(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            requests: default_requests(),
        }
    }
}

impl RoutingSettings {
    pub fn criterion(&self) -> Result<CountingCriterion, ConfigError> {
        CountingCriterion::new(self.sample_period)
    }

    /// Equality first, then the latency tolerance.
    pub fn validator<T: PartialEq + 'static>(&self) -> ChainValidator<T> {
        ChainValidator::new()
            .with(EqualsAcceptance)
            .with(PerformanceAcceptance::new(Duration::from_millis(
                self.max_deviance_ms,
            )))
    }

    pub fn side_timeout(&self) -> Option<Duration> {
        self.side_timeout_ms.map(Duration::from_millis)
    }
}

impl MuxSettings {
    /// Load settings from a TOML file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MUX_ prefix, __ for nesting)
    /// 2. TOML config file
    /// 3. Defaults
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let settings: MuxSettings = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("MUX_").split("__"))
            .extract()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "mux.toml",
                r#"
                [sides]
                a_url = "http://control:8080/api"
                b_url = "http://candidate:8080/api"
                "#,
            )?;

            let settings = MuxSettings::load("mux.toml").map_err(|e| e.to_string())?;
            assert_eq!(settings.routing.mode, RoutingMode::ShadowPassive);
            assert_eq!(settings.routing.sample_period, 10);
            assert_eq!(settings.routing.side_timeout(), None);
            assert_eq!(settings.sides.timeout_secs, 30);
            assert_eq!(settings.probe.requests, 100);
            assert_eq!(settings.tracing.service_name, "endpoint-mux");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "mux.toml",
                r#"
                [routing]
                mode = "shadow-active"
                sample_period = 4

                [sides]
                a_url = "http://control"
                b_url = "http://candidate"
                "#,
            )?;
            jail.set_env("MUX_ROUTING__MODE", "b-side");
            jail.set_env("MUX_ROUTING__SIDE_TIMEOUT_MS", "750");

            let settings = MuxSettings::load("mux.toml").map_err(|e| e.to_string())?;
            assert_eq!(settings.routing.mode, RoutingMode::BSide);
            assert_eq!(settings.routing.sample_period, 4);
            assert_eq!(
                settings.routing.side_timeout(),
                Some(Duration::from_millis(750))
            );
            Ok(())
        });
    }

    #[test]
    fn test_missing_sides_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("mux.toml", "[routing]\nsample_period = 2\n")?;
            assert!(MuxSettings::load("mux.toml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_zero_sample_period_rejected_by_criterion() {
        let settings = RoutingSettings {
            sample_period: 0,
            ..RoutingSettings::default()
        };
        assert_eq!(
            settings.criterion().unwrap_err(),
            ConfigError::InvalidSamplePeriod
        );
    }

    #[test]
    fn test_default_validator_chain() {
        let settings = RoutingSettings::default();
        assert_eq!(settings.validator::<String>().len(), 2);
    }
}
