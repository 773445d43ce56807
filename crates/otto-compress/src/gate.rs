//! The compression gate: decides whether to call the backend and always
//! hands back usable text.

use crate::{Backend, CompressionRequest, GateSettings, ResponseCache};
use chrono::Utc;
use otto_telemetry::{estimate_tokens, CompressionEvent, JsonlRecorder, Outcome};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Receives one event per gate call
pub trait CompressionObserver: Send + Sync {
    fn on_event(&self, event: &CompressionEvent);
}

impl CompressionObserver for JsonlRecorder {
    fn on_event(&self, event: &CompressionEvent) {
        if let Err(e) = self.record(event) {
            tracing::debug!(error = %e, "failed to record compression event");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub text: String,
    pub outcome: Outcome,
    pub original_chars: usize,
    pub compressed_chars: usize,
}

impl CompressionResult {
    fn passthrough(text: &str, outcome: Outcome) -> Self {
        let chars = text.chars().count();
        Self {
            text: text.to_string(),
            outcome,
            original_chars: chars,
            compressed_chars: chars,
        }
    }

    fn compressed(original: &str, output: String, outcome: Outcome) -> Self {
        Self {
            original_chars: original.chars().count(),
            compressed_chars: output.chars().count(),
            text: output,
            outcome,
        }
    }

    pub fn used_compression(&self) -> bool {
        self.outcome.used_compression()
    }

    /// Original length over compressed length; 1.0 when nothing came back
    pub fn ratio(&self) -> f64 {
        if self.compressed_chars == 0 {
            1.0
        } else {
            self.original_chars as f64 / self.compressed_chars as f64
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

pub struct CompressionGate {
    backend: Backend,
    settings: GateSettings,
    cache: ResponseCache,
    permits: Semaphore,
    observer: Option<Arc<dyn CompressionObserver>>,
}

impl CompressionGate {
    pub fn new(backend: Backend, settings: GateSettings) -> Self {
        Self {
            cache: ResponseCache::new(settings.cache_ttl),
            permits: Semaphore::new(settings.max_concurrency.max(1)),
            backend,
            settings,
            observer: None,
        }
    }

    /// A gate that never calls out
    pub fn disabled() -> Self {
        Self::new(Backend::Disabled, GateSettings::new())
    }

    pub fn with_observer(mut self, observer: Arc<dyn CompressionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_enabled()
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    /// Compress with the configured default aggressiveness
    pub async fn compress(&self, text: &str) -> CompressionResult {
        self.compress_with(text, self.settings.default_aggressiveness)
            .await
    }

    pub async fn compress_with(&self, text: &str, aggressiveness: f64) -> CompressionResult {
        self.compress_until(text, aggressiveness, std::future::pending::<()>())
            .await
    }

    /// Like [`compress_with`](Self::compress_with), but gives up on the
    /// backend call as soon as `cancelled` resolves and returns the original
    /// text.
    pub async fn compress_until<F>(
        &self,
        text: &str,
        aggressiveness: f64,
        cancelled: F,
    ) -> CompressionResult
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let (result, error) = self.run(text, aggressiveness, cancelled).await;
        self.emit(text, &result, aggressiveness, started.elapsed(), error);
        result
    }

    /// Blocking variant for call sites without a runtime.
    ///
    /// Inside a tokio runtime this cannot block, so it falls back to the
    /// original text; use the async methods there.
    pub fn compress_blocking(&self, text: &str, aggressiveness: f64) -> CompressionResult {
        if tokio::runtime::Handle::try_current().is_ok() {
            let result = CompressionResult::passthrough(text, Outcome::BackendFailed);
            let error = "compress_blocking called inside a tokio runtime".to_string();
            self.emit(text, &result, aggressiveness, Duration::ZERO, Some(error));
            return result;
        }

        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.compress_with(text, aggressiveness)),
            Err(e) => {
                let result = CompressionResult::passthrough(text, Outcome::BackendFailed);
                let error = format!("could not start runtime: {}", e);
                self.emit(text, &result, aggressiveness, Duration::ZERO, Some(error));
                result
            }
        }
    }

    async fn run<F>(
        &self,
        text: &str,
        aggressiveness: f64,
        cancelled: F,
    ) -> (CompressionResult, Option<String>)
    where
        F: Future<Output = ()>,
    {
        let backend = match &self.backend {
            Backend::Disabled => {
                return (CompressionResult::passthrough(text, Outcome::Disabled), None)
            }
            Backend::Enabled(backend) => backend,
        };

        if text.chars().count() < self.settings.min_length {
            return (
                CompressionResult::passthrough(text, Outcome::BelowThreshold),
                None,
            );
        }

        if let Some(output) = self.cache.get(text, aggressiveness) {
            return (
                CompressionResult::compressed(text, output, Outcome::Cached),
                None,
            );
        }

        let request = CompressionRequest {
            input: text.to_string(),
            aggressiveness,
        };
        let call = async {
            let _permit = self.permits.acquire().await.ok();
            tokio::time::timeout(self.settings.timeout, backend.compress(&request)).await
        };

        tokio::select! {
            biased;
            _ = cancelled => (
                CompressionResult::passthrough(text, Outcome::Cancelled),
                Some("cancelled by caller".to_string()),
            ),
            outcome = call => match outcome {
                Ok(Ok(response)) => {
                    self.cache.insert(text, aggressiveness, &response.output);
                    (
                        CompressionResult::compressed(text, response.output, Outcome::Compressed),
                        None,
                    )
                }
                Ok(Err(e)) => (
                    CompressionResult::passthrough(text, Outcome::BackendFailed),
                    Some(e.to_string()),
                ),
                Err(_) => (
                    CompressionResult::passthrough(text, Outcome::TimedOut),
                    Some(format!("no response within {:?}", self.settings.timeout)),
                ),
            },
        }
    }

    fn emit(
        &self,
        original: &str,
        result: &CompressionResult,
        aggressiveness: f64,
        elapsed: Duration,
        error: Option<String>,
    ) {
        let ratio = result.ratio();
        match result.outcome {
            Outcome::Compressed => tracing::info!(
                "Compressed {} -> {} chars ({:.1}x)",
                result.original_chars,
                result.compressed_chars,
                ratio
            ),
            Outcome::Cached => {
                tracing::debug!(chars = result.original_chars, "compression cache hit")
            }
            Outcome::Disabled => tracing::debug!("compression not configured, skipping"),
            Outcome::BelowThreshold => tracing::trace!(
                chars = result.original_chars,
                min_length = self.settings.min_length,
                "text below compression threshold"
            ),
            Outcome::BackendFailed | Outcome::TimedOut | Outcome::Cancelled => tracing::warn!(
                outcome = %result.outcome,
                error = error.as_deref().unwrap_or(""),
                "compression failed, using original text"
            ),
        }

        let Some(observer) = &self.observer else {
            return;
        };
        let output_tokens = if result.used_compression() {
            estimate_tokens(&result.text)
        } else {
            estimate_tokens(original)
        };
        observer.on_event(&CompressionEvent {
            timestamp: Utc::now(),
            outcome: result.outcome,
            original_chars: result.original_chars,
            output_chars: result.compressed_chars,
            ratio,
            original_tokens: estimate_tokens(original),
            output_tokens,
            aggressiveness: Some(aggressiveness),
            elapsed_ms: elapsed.as_millis() as u64,
            error,
        });
    }
}

impl std::fmt::Debug for CompressionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionGate")
            .field("backend", &self.backend)
            .field("settings", &self.settings)
            .field("cached", &self.cache.len())
            .finish()
    }
}
