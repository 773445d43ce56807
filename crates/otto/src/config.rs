//! Runtime configuration: `TTC_*` environment, then `~/.otto/otto.json`
//! for anything the environment leaves unset.

use otto_compress::{CompressionConfig, CompressionGate};
use otto_telemetry::{JsonlRecorder, Paths};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    assumed_year: Option<i32>,
    #[serde(default)]
    record_events: Option<bool>,
    #[serde(default)]
    compression: CompressionOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct CompressionOverrides {
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    aggressiveness: Option<f64>,
    #[serde(default)]
    timeout_ms: Option<u64>,
    #[serde(default)]
    max_concurrency: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pinned year for month-day phrases; `None` uses the reference year
    pub assumed_year: Option<i32>,
    pub record_events: bool,
    pub compression: CompressionConfig,
    pub paths: Option<Paths>,
}

impl AppConfig {
    pub fn load() -> Self {
        let paths = Paths::new().ok();
        let file = paths
            .as_ref()
            .map(|p| read_config_file(&p.config_file()))
            .unwrap_or_default();
        let env_set = |key: &str| std::env::var_os(key).is_some();
        Self::from_parts(CompressionConfig::from_env(), file, env_set, paths)
    }

    fn from_parts(
        mut compression: CompressionConfig,
        file: ConfigFile,
        env_set: impl Fn(&str) -> bool,
        paths: Option<Paths>,
    ) -> Self {
        let overrides = file.compression;
        let settings = &mut compression.settings;
        if let Some(v) = overrides.min_length.filter(|_| !env_set("TTC_MIN_LENGTH")) {
            settings.min_length = v;
        }
        if let Some(v) = overrides.aggressiveness.filter(|_| !env_set("TTC_AGGRESSIVENESS")) {
            settings.default_aggressiveness = v;
        }
        if let Some(v) = overrides.timeout_ms.filter(|_| !env_set("TTC_TIMEOUT_MS")) {
            settings.timeout = Duration::from_millis(v);
        }
        if let Some(v) = overrides.max_concurrency.filter(|_| !env_set("TTC_MAX_CONCURRENCY")) {
            settings.max_concurrency = v.max(1);
        }

        Self {
            assumed_year: file.assumed_year,
            record_events: file.record_events.unwrap_or(true),
            compression,
            paths,
        }
    }

    /// Build the gate, wired to the event log unless recording is off
    pub fn gate(&self) -> CompressionGate {
        let gate = self.compression.build_gate();
        match (&self.paths, self.record_events) {
            (Some(paths), true) => gate.with_observer(Arc::new(JsonlRecorder::from_paths(paths))),
            _ => gate,
        }
    }
}

fn read_config_file(path: &Path) -> ConfigFile {
    if !path.exists() {
        return ConfigFile::default();
    }
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read config");
            return ConfigFile::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
            ConfigFile::default()
        }
    }
}
