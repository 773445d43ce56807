//! Compression event record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a single pass through the compression gate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Backend returned compressed text
    Compressed,
    /// Served from the response cache
    Cached,
    /// No backend credential configured
    Disabled,
    /// Text shorter than the minimum length
    BelowThreshold,
    /// Backend call returned an error
    BackendFailed,
    /// Backend call exceeded its timeout
    TimedOut,
    /// Caller cancelled while the backend call was in flight
    Cancelled,
}

impl Outcome {
    /// True when the returned text came from the backend (fresh or cached)
    pub fn used_compression(self) -> bool {
        matches!(self, Outcome::Compressed | Outcome::Cached)
    }

    /// True for the fallback outcomes caused by a failed backend call
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Outcome::BackendFailed | Outcome::TimedOut | Outcome::Cancelled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Compressed => "compressed",
            Outcome::Cached => "cached",
            Outcome::Disabled => "disabled",
            Outcome::BelowThreshold => "below_threshold",
            Outcome::BackendFailed => "backend_failed",
            Outcome::TimedOut => "timed_out",
            Outcome::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record per compression gate call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionEvent {
    pub timestamp: DateTime<Utc>,
    pub outcome: Outcome,
    pub original_chars: usize,
    pub output_chars: usize,
    pub ratio: f64,
    #[serde(default)]
    pub original_tokens: usize,
    #[serde(default)]
    pub output_tokens: usize,
    #[serde(default)]
    pub aggressiveness: Option<f64>,
    #[serde(default)]
    pub elapsed_ms: u64,
    #[serde(default)]
    pub error: Option<String>,
}
