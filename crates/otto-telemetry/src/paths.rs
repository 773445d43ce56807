//! Path resolution for otto state files

use std::path::PathBuf;

/// Overrides the state directory (tests, sandboxed runs)
pub const HOME_ENV: &str = "OTTO_HOME";

/// Resolves standard paths under the otto state directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub home_otto: PathBuf,
}

impl Paths {
    /// `$OTTO_HOME` if set, otherwise `~/.otto`
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(dir)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;
        Ok(Self::at(home.join(".otto")))
    }

    pub fn at(home_otto: PathBuf) -> Self {
        Self { home_otto }
    }

    pub fn telemetry_dir(&self) -> PathBuf {
        self.home_otto.join("telemetry")
    }

    /// Compression event log
    pub fn events_file(&self) -> PathBuf {
        self.telemetry_dir().join("compression.jsonl")
    }

    /// Optional user config (`otto.json`)
    pub fn config_file(&self) -> PathBuf {
        self.home_otto.join("otto.json")
    }
}
