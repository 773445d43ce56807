//! Best-effort compression of tool output before it reaches the model

mod backend;
mod cache;
mod client;
mod config;
mod error;
mod gate;

pub use backend::{Backend, BackendResponse, CompressionBackend, CompressionRequest};
pub use cache::ResponseCache;
pub use client::{TokenCompanyClient, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use config::{CompressionConfig, GateSettings};
pub use error::CompressError;
pub use gate::{CompressionGate, CompressionObserver, CompressionResult};
pub use otto_telemetry::Outcome;
