use async_trait::async_trait;
use otto_compress::{
    BackendResponse, CompressError, CompressionBackend, CompressionObserver, CompressionRequest,
    GateSettings,
};
use otto_telemetry::CompressionEvent;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[allow(dead_code)]
pub enum Reply {
    /// Return the first `n` chars of the input
    Truncate(usize),
    Fail,
    Empty,
    Hang,
    /// Sleep, then truncate
    Slow(Duration, usize),
}

pub struct ScriptedBackend {
    reply: Reply,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn truncated(input: &str, n: usize) -> BackendResponse {
    BackendResponse {
        output: input.chars().take(n).collect(),
        output_tokens: None,
        original_input_tokens: None,
        compression_time: Some(0.01),
    }
}

#[async_trait]
impl CompressionBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<BackendResponse, CompressError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = match &self.reply {
            Reply::Truncate(n) => Ok(truncated(&request.input, *n)),
            Reply::Fail => Err(CompressError::Status {
                status: 429,
                body: "quota exceeded".to_string(),
            }),
            Reply::Empty => Ok(truncated(&request.input, 0)),
            Reply::Hang => std::future::pending().await,
            Reply::Slow(delay, n) => {
                tokio::time::sleep(*delay).await;
                Ok(truncated(&request.input, *n))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[derive(Default)]
pub struct CollectingObserver {
    pub events: Mutex<Vec<CompressionEvent>>,
}

impl CollectingObserver {
    pub fn events(&self) -> Vec<CompressionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CompressionObserver for CollectingObserver {
    fn on_event(&self, event: &CompressionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn settings() -> GateSettings {
    GateSettings {
        timeout: Duration::from_secs(5),
        ..GateSettings::new()
    }
}

pub fn long_text() -> String {
    "Subject: Quarterly planning. Rachel wrote about the roadmap review. ".repeat(20)
}
