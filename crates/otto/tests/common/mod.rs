use async_trait::async_trait;
use otto_compress::{BackendResponse, CompressError, CompressionBackend, CompressionRequest};

/// Keeps every other word, like a very blunt summarizer
pub struct HalvingBackend;

#[async_trait]
impl CompressionBackend for HalvingBackend {
    fn name(&self) -> &str {
        "halving"
    }

    async fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<BackendResponse, CompressError> {
        let output = request
            .input
            .split_whitespace()
            .step_by(2)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(BackendResponse {
            output,
            output_tokens: None,
            original_input_tokens: None,
            compression_time: None,
        })
    }
}

/// A tool result the agent would otherwise read aloud in full
pub fn inbox_listing() -> String {
    (1..=12)
        .map(|i| {
            format!(
                "From: team{}@example.com Subject: Follow-up on planning item {} \
                 Received: 2026-01-{:02} Body: please review the attached notes.\n",
                i,
                i,
                i + 10
            )
        })
        .collect()
}
