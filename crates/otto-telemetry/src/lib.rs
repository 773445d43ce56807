//! Compression event records, JSONL persistence and token estimation

mod io;
mod paths;
mod recorder;
mod stats;
mod tokens;
mod types;

pub use io::{append_jsonl, read_jsonl};
pub use paths::Paths;
pub use recorder::{JsonlRecorder, RecorderError};
pub use stats::EventSummary;
pub use tokens::estimate_tokens;
pub use types::{CompressionEvent, Outcome};
