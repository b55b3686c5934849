//! Routing mode: which sides run and which one answers the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::result::Side;

/// Operating mode for a routing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingMode {
    /// Only the control side is called.
    ASide,
    /// Only the candidate side is called.
    BSide,
    /// Sampled calls run both sides; the candidate answers.
    ShadowActive,
    /// Sampled calls run both sides; the control answers.
    ShadowPassive,
}

impl RoutingMode {
    /// Whether this mode consults the routing criterion at all.
    pub fn is_shadow(self) -> bool {
        matches!(self, RoutingMode::ShadowActive | RoutingMode::ShadowPassive)
    }

    /// The side whose result is returned for a sampled call.
    pub fn authoritative_side(self) -> Side {
        match self {
            RoutingMode::ASide | RoutingMode::ShadowPassive => Side::A,
            RoutingMode::BSide | RoutingMode::ShadowActive => Side::B,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoutingMode::ASide => "a-side",
            RoutingMode::BSide => "b-side",
            RoutingMode::ShadowActive => "shadow-active",
            RoutingMode::ShadowPassive => "shadow-passive",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a-side" => Ok(RoutingMode::ASide),
            "b-side" => Ok(RoutingMode::BSide),
            "shadow-active" => Ok(RoutingMode::ShadowActive),
            "shadow-passive" => Ok(RoutingMode::ShadowPassive),
            other => anyhow::bail!(
                "unknown routing mode `{other}` (expected a-side, b-side, shadow-active or shadow-passive)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authoritative_side() {
        assert_eq!(RoutingMode::ASide.authoritative_side(), Side::A);
        assert_eq!(RoutingMode::BSide.authoritative_side(), Side::B);
        assert_eq!(RoutingMode::ShadowActive.authoritative_side(), Side::B);
        assert_eq!(RoutingMode::ShadowPassive.authoritative_side(), Side::A);
    }

    #[test]
    fn test_parse_matches_serde_names() {
        for mode in [
            RoutingMode::ASide,
            RoutingMode::BSide,
            RoutingMode::ShadowActive,
            RoutingMode::ShadowPassive,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            assert_eq!(mode.as_str().parse::<RoutingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "both".parse::<RoutingMode>().unwrap_err();
        assert!(err.to_string().contains("unknown routing mode"));
    }

    #[test]
    fn test_only_shadow_modes_sample() {
        assert!(!RoutingMode::ASide.is_shadow());
        assert!(!RoutingMode::BSide.is_shadow());
        assert!(RoutingMode::ShadowActive.is_shadow());
        assert!(RoutingMode::ShadowPassive.is_shadow());
    }
}
