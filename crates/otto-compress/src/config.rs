//! Compression gate configuration

use crate::{Backend, CompressionGate, TokenCompanyClient, DEFAULT_ENDPOINT};
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_ENV: &str = "TTC_API_KEY";
pub const ENDPOINT_ENV: &str = "TTC_BASE_URL";
pub const TIMEOUT_ENV: &str = "TTC_TIMEOUT_MS";
pub const CONCURRENCY_ENV: &str = "TTC_MAX_CONCURRENCY";
pub const AGGRESSIVENESS_ENV: &str = "TTC_AGGRESSIVENESS";
pub const MIN_LENGTH_ENV: &str = "TTC_MIN_LENGTH";

/// Tunables for the gate itself, independent of which backend is wired in
#[derive(Debug, Clone, PartialEq)]
pub struct GateSettings {
    /// Texts shorter than this many characters are never sent
    pub min_length: usize,

    /// Used by `compress()` when the caller doesn't pick a value
    pub default_aggressiveness: f64,

    /// Bound on each backend call
    pub timeout: Duration,

    /// Max backend calls in flight at once
    pub max_concurrency: usize,

    /// How long successful outputs stay cached (zero disables the cache)
    pub cache_ttl: Duration,
}

impl GateSettings {
    pub fn new() -> Self {
        Self {
            min_length: 500,
            default_aggressiveness: 0.7,
            timeout: Duration::from_millis(4000),
            max_concurrency: 3,
            cache_ttl: Duration::from_secs(12 * 60 * 60),
        }
    }
}

impl Default for GateSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Full configuration: credential, endpoint and gate settings
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionConfig {
    /// `None` means compression is permanently disabled for this process
    pub api_key: Option<String>,
    pub endpoint: String,
    pub settings: GateSettings,
}

impl CompressionConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            settings: GateSettings::new(),
        }
    }

    /// Read configuration from `TTC_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = GateSettings::new();
        let api_key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let endpoint = lookup(ENDPOINT_ENV)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_ms = parse_or(&lookup, TIMEOUT_ENV, defaults.timeout.as_millis() as u64);
        let max_concurrency: usize = parse_or(&lookup, CONCURRENCY_ENV, defaults.max_concurrency);
        let default_aggressiveness =
            parse_or(&lookup, AGGRESSIVENESS_ENV, defaults.default_aggressiveness);
        let min_length = parse_or(&lookup, MIN_LENGTH_ENV, defaults.min_length);

        Self {
            api_key,
            endpoint,
            settings: GateSettings {
                min_length,
                default_aggressiveness,
                timeout: Duration::from_millis(timeout_ms),
                max_concurrency: max_concurrency.max(1),
                cache_ttl: defaults.cache_ttl,
            },
        }
    }

    /// Construct the backend handle this configuration describes
    pub fn backend(&self) -> Backend {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("{} not set, compression disabled", API_KEY_ENV);
            return Backend::Disabled;
        };
        match TokenCompanyClient::with_endpoint(api_key.clone(), self.endpoint.clone()) {
            Ok(client) => Backend::enabled(client),
            Err(e) => {
                tracing::warn!(error = %e, "could not build compression client, disabling");
                Backend::Disabled
            }
        }
    }

    pub fn build_gate(&self) -> CompressionGate {
        CompressionGate::new(self.backend(), self.settings.clone())
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring invalid setting");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = GateSettings::new();
        assert_eq!(settings.min_length, 500);
        assert_eq!(settings.default_aggressiveness, 0.7);
        assert_eq!(settings.timeout, Duration::from_millis(4000));
        assert_eq!(settings.max_concurrency, 3);
    }

    #[test]
    fn test_missing_key_is_disabled() {
        let config = CompressionConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.backend().is_enabled());
    }

    #[test]
    fn test_blank_key_is_disabled() {
        let config = CompressionConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "  ")]));
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_overrides_parsed() {
        let config = CompressionConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "ttc-123"),
            (ENDPOINT_ENV, "http://127.0.0.1:9/v1/compress"),
            (TIMEOUT_ENV, "250"),
            (CONCURRENCY_ENV, "8"),
            (AGGRESSIVENESS_ENV, "0.4"),
            (MIN_LENGTH_ENV, "1000"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("ttc-123"));
        assert_eq!(config.endpoint, "http://127.0.0.1:9/v1/compress");
        assert_eq!(config.settings.timeout, Duration::from_millis(250));
        assert_eq!(config.settings.max_concurrency, 8);
        assert_eq!(config.settings.default_aggressiveness, 0.4);
        assert_eq!(config.settings.min_length, 1000);
        assert!(config.backend().is_enabled());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = CompressionConfig::from_lookup(lookup_from(&[
            (TIMEOUT_ENV, "soon"),
            (CONCURRENCY_ENV, "0"),
            (AGGRESSIVENESS_ENV, "high"),
        ]));
        assert_eq!(config.settings.timeout, Duration::from_millis(4000));
        assert_eq!(config.settings.max_concurrency, 1);
        assert_eq!(config.settings.default_aggressiveness, 0.7);
    }
}
