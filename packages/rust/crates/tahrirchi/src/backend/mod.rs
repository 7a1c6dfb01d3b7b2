//! Backend seam: one "generate structured content" call.
//!
//! The analysis client only talks to [`GenerativeBackend`]; the Gemini REST
//! client is the production implementation and tests plug in scripted ones.

mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ApiKey;

pub use gemini::GeminiBackend;

/// Mime type requested for every structured call.
pub const JSON_MIME_TYPE: &str = "application/json";

/// One structured-generation call.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    /// Text to analyze, sent as the user content.
    pub contents: String,
    pub system_instruction: String,
    pub response_mime_type: &'static str,
    pub response_schema: serde_json::Value,
    pub api_key: ApiKey,
}

/// Raw backend answer: the generated JSON text, if any was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: Option<String>,
}

/// Transport-level failure. Messages may contain backend diagnostics and are
/// meant for logs only, after redaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Non-success HTTP status.
    #[error("backend returned {status}: {message}")]
    Status {
        status: u16,
        /// Backend status label, e.g. `PERMISSION_DENIED` or `INVALID_ARGUMENT`.
        status_text: Option<String>,
        message: String,
    },
    #[error("backend request timed out")]
    Timeout,
    #[error("backend transport error: {0}")]
    Transport(String),
    /// Success status but the envelope could not be decoded.
    #[error("backend response decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, BackendError>;
}
