//! HTTP backend for the Token Company bear-1 compression API

use crate::{BackendResponse, CompressError, CompressionBackend, CompressionRequest};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.thetokencompany.com/v1/compress";
pub const DEFAULT_MODEL: &str = "bear-1";

/// Error bodies are truncated to this many chars in `CompressError::Status`
const MAX_ERROR_BODY: usize = 200;

#[derive(Serialize)]
struct CompressionSettings {
    aggressiveness: f64,
    max_output_tokens: Option<u64>,
    min_output_tokens: Option<u64>,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    compression_settings: CompressionSettings,
    input: &'a str,
}

pub struct TokenCompanyClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl TokenCompanyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CompressError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, CompressError> {
        // No idle pooling: the blocking wrapper runs each call on its own
        // short-lived runtime, and pooled connections die with it.
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompressionBackend for TokenCompanyClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<BackendResponse, CompressError> {
        let body = WireRequest {
            model: &self.model,
            compression_settings: CompressionSettings {
                aggressiveness: request.aggressiveness,
                max_output_tokens: None,
                min_output_tokens: None,
            },
            input: &request.input,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompressError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let text = response.text().await?;
        let parsed: BackendResponse = serde_json::from_str(&text)?;
        Ok(parsed)
    }
}
