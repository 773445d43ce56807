/// Failures from a compression backend. The gate absorbs all of these.
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("compression request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("compression API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed compression response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
