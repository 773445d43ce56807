//! Backend seam for the compression gate

use crate::CompressError;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionRequest {
    pub input: String,
    /// 0.0 (keep everything) to 1.0 (shrink hardest); not clamped
    pub aggressiveness: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendResponse {
    pub output: String,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub original_input_tokens: Option<u64>,
    /// Seconds spent compressing, as reported by the service
    #[serde(default)]
    pub compression_time: Option<f64>,
}

/// A remote (or fake) text compression service
#[async_trait]
pub trait CompressionBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<BackendResponse, CompressError>;
}

/// Backend handle injected into the gate.
///
/// `Disabled` is a valid permanent state (no credential), not an error.
#[derive(Clone, Default)]
pub enum Backend {
    #[default]
    Disabled,
    Enabled(Arc<dyn CompressionBackend>),
}

impl Backend {
    pub fn enabled(backend: impl CompressionBackend + 'static) -> Self {
        Backend::Enabled(Arc::new(backend))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Backend::Enabled(_))
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Disabled => f.write_str("Backend::Disabled"),
            Backend::Enabled(b) => write!(f, "Backend::Enabled({})", b.name()),
        }
    }
}
