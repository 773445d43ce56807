mod common;

use common::{long_text, settings, CollectingObserver, Reply, ScriptedBackend};
use otto_compress::{Backend, CompressionGate, GateSettings, Outcome};
use std::sync::Arc;
use std::time::Duration;

fn gate_with(
    reply: Reply,
    settings: GateSettings,
) -> (CompressionGate, Arc<ScriptedBackend>, Arc<CollectingObserver>) {
    let backend = Arc::new(ScriptedBackend::new(reply));
    let observer = Arc::new(CollectingObserver::default());
    let gate = CompressionGate::new(Backend::Enabled(backend.clone()), settings)
        .with_observer(observer.clone());
    (gate, backend, observer)
}

#[tokio::test]
async fn test_short_text_never_reaches_backend() {
    let (gate, backend, observer) = gate_with(Reply::Truncate(10), settings());
    let text = "Three unread emails.";

    for aggressiveness in [0.0, 0.3, 0.7, 1.0] {
        let result = gate.compress_with(text, aggressiveness).await;
        assert_eq!(result.text, text);
        assert_eq!(result.outcome, Outcome::BelowThreshold);
    }
    assert_eq!(backend.calls(), 0);
    assert_eq!(observer.events().len(), 4);
}

#[tokio::test]
async fn test_threshold_is_configurable() {
    let custom = GateSettings {
        min_length: 10,
        ..settings()
    };
    let (gate, backend, _) = gate_with(Reply::Truncate(5), custom);

    let result = gate.compress("Three unread emails.").await;
    assert_eq!(result.text, "Three");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_disabled_backend_returns_input() {
    let observer = Arc::new(CollectingObserver::default());
    let gate = CompressionGate::new(Backend::Disabled, settings()).with_observer(observer.clone());
    let text = long_text();

    let result = gate.compress(&text).await;
    assert_eq!(result.text, text);
    assert!(!result.used_compression());
    assert_eq!(observer.events()[0].outcome, Outcome::Disabled);
}

#[tokio::test]
async fn test_successful_compression() {
    let (gate, backend, observer) = gate_with(Reply::Truncate(100), settings());
    let text = long_text();

    let result = gate.compress(&text).await;
    assert_eq!(result.text, text.chars().take(100).collect::<String>());
    assert_eq!(result.outcome, Outcome::Compressed);
    assert!((result.ratio() - 13.6).abs() < 1e-9);
    assert_eq!(backend.calls(), 1);

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].output_chars, 100);
    assert_eq!(events[0].aggressiveness, Some(0.7));
    assert!(events[0].output_tokens < events[0].original_tokens);
}

#[tokio::test]
async fn test_failing_backend_falls_back_once() {
    let (gate, backend, observer) = gate_with(Reply::Fail, settings());
    let text = long_text();

    let result = gate.compress(&text).await;
    assert_eq!(result.text, text);
    assert_eq!(result.outcome, Outcome::BackendFailed);
    assert_eq!(backend.calls(), 1);

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].error.as_deref().unwrap().contains("429"));
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let (gate, backend, _) = gate_with(Reply::Fail, settings());
    let text = long_text();

    gate.compress(&text).await;
    gate.compress(&text).await;
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_empty_output_is_returned_with_unit_ratio() {
    let (gate, _, observer) = gate_with(Reply::Empty, settings());
    let text = long_text();

    let result = gate.compress(&text).await;
    assert_eq!(result.text, "");
    assert_eq!(result.outcome, Outcome::Compressed);
    assert_eq!(result.compressed_chars, 0);
    assert_eq!(result.ratio(), 1.0);

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ratio, 1.0);
    assert_eq!(events[0].error, None);
}

#[tokio::test]
async fn test_cache_hit_skips_backend() {
    let (gate, backend, observer) = gate_with(Reply::Truncate(50), settings());
    let text = long_text();

    let first = gate.compress(&text).await;
    let second = gate.compress(&text).await;
    assert_eq!(first.text, second.text);
    assert_eq!(second.outcome, Outcome::Cached);
    assert_eq!(backend.calls(), 1);

    // Different aggressiveness is a different cache entry
    gate.compress_with(&text, 0.2).await;
    assert_eq!(backend.calls(), 2);
    assert_eq!(observer.events().len(), 3);
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let quick = GateSettings {
        timeout: Duration::from_millis(50),
        ..settings()
    };
    let (gate, _, observer) = gate_with(Reply::Hang, quick);
    let text = long_text();

    let result = gate.compress(&text).await;
    assert_eq!(result.text, text);
    assert_eq!(result.outcome, Outcome::TimedOut);
    assert_eq!(observer.events().len(), 1);
}

#[tokio::test]
async fn test_cancellation_falls_back() {
    let (gate, backend, observer) = gate_with(Reply::Hang, settings());
    let text = long_text();

    let result = gate
        .compress_until(&text, 0.7, tokio::time::sleep(Duration::from_millis(20)))
        .await;
    assert_eq!(result.text, text);
    assert_eq!(result.outcome, Outcome::Cancelled);
    assert_eq!(backend.calls(), 1);
    assert_eq!(observer.events()[0].outcome, Outcome::Cancelled);
}

#[tokio::test]
async fn test_fast_path_is_idempotent() {
    let (gate, _, _) = gate_with(Reply::Truncate(3), settings());
    let text = "short tool output";

    let once = gate.compress(text).await.into_text();
    let twice = gate.compress(text).await.into_text();
    assert_eq!(once, text);
    assert_eq!(once, twice);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit() {
    let limited = GateSettings {
        min_length: 1,
        max_concurrency: 2,
        ..settings()
    };
    let (gate, backend, _) = gate_with(Reply::Slow(Duration::from_millis(30), 1), limited);
    let gate = Arc::new(gate);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..6 {
        let gate = gate.clone();
        tasks.spawn(async move { gate.compress(&format!("distinct text {}", i)).await });
    }
    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap().outcome, Outcome::Compressed);
    }

    assert_eq!(backend.calls(), 6);
    assert!(backend.max_in_flight.load(std::sync::atomic::Ordering::SeqCst) <= 2);
}

#[test]
fn test_blocking_wrapper_matches_async() {
    let (gate, backend, observer) = gate_with(Reply::Truncate(100), settings());
    let text = long_text();

    let result = gate.compress_blocking(&text, 0.7);
    assert_eq!(result.outcome, Outcome::Compressed);
    assert_eq!(result.compressed_chars, 100);
    assert_eq!(backend.calls(), 1);
    assert_eq!(observer.events().len(), 1);
}

#[tokio::test]
async fn test_blocking_wrapper_inside_runtime_falls_back() {
    let (gate, backend, observer) = gate_with(Reply::Truncate(100), settings());
    let text = long_text();

    let result = gate.compress_blocking(&text, 0.7);
    assert_eq!(result.text, text);
    assert_eq!(result.outcome, Outcome::BackendFailed);
    assert_eq!(backend.calls(), 0);

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].error.as_deref().unwrap().contains("inside a tokio runtime"));
}
