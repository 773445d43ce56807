use crate::{append_jsonl, read_jsonl, CompressionEvent, Paths};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("event log I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Appends compression events to a JSONL log
#[derive(Debug, Clone)]
pub struct JsonlRecorder {
    path: PathBuf,
}

impl JsonlRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Recorder for the default event log
    pub fn from_paths(paths: &Paths) -> Self {
        Self::new(paths.events_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, event: &CompressionEvent) -> Result<(), RecorderError> {
        append_jsonl(&self.path, event).map_err(|source| RecorderError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn load(&self) -> Result<Vec<CompressionEvent>, RecorderError> {
        read_jsonl(&self.path).map_err(|source| RecorderError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
