//! Analysis client: one request in, one validated result or classified error out.
//!
//! Flow per call:
//! 1. Reject empty input, then require the API key (both before any network I/O).
//! 2. Pick the instruction and schema for the operation.
//! 3. One `generate_content` call on the backend.
//! 4. Parse, validate against the schema, drop out-of-bounds spans.

use std::sync::Arc;
use std::time::Instant;

use crate::backend::{
    BackendError, GeminiBackend, GenerateRequest, GenerativeBackend, JSON_MIME_TYPE,
};
use crate::config::{ApiKey, ClientConfig};
use crate::contracts::{AnalysisRequest, AnalysisResult, LanguageCode, Operation};
use crate::error::AnalysisError;
use crate::prompts::system_instruction;
use crate::response::parse_payload;
use crate::schema::{ResponseValidator, response_schema};

/// Stateless client over a [`GenerativeBackend`]. Cheap to share behind `Arc`.
pub struct AnalysisClient {
    config: ClientConfig,
    backend: Arc<dyn GenerativeBackend>,
    validator: ResponseValidator,
}

impl AnalysisClient {
    /// Build a client over an explicit backend.
    ///
    /// # Errors
    /// Returns [`AnalysisError::Configuration`] if the response schemas fail to compile.
    pub fn new(
        config: ClientConfig,
        backend: Arc<dyn GenerativeBackend>,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            config,
            backend,
            validator: ResponseValidator::new()?,
        })
    }

    /// Build a client talking to Gemini at `config.base_url`.
    ///
    /// # Errors
    /// See [`AnalysisClient::new`].
    pub fn gemini(config: ClientConfig) -> Result<Self, AnalysisError> {
        let backend = GeminiBackend::new(&config.base_url, config.timeout_secs);
        Self::new(config, Arc::new(backend))
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether an API key is configured; no call can succeed without one.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Analyze `text` in `language` with `operation`.
    ///
    /// # Errors
    /// Any [`AnalysisError`] kind; see the module docs for ordering.
    pub async fn analyze_text(
        &self,
        text: &str,
        language: LanguageCode,
        operation: Operation,
    ) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalysisRequest::new(text, language, operation)?;
        self.analyze(&request).await
    }

    /// Analyze an already-validated request.
    ///
    /// # Errors
    /// Same as [`AnalysisClient::analyze_text`], minus `EmptyInput`.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.require_api_key()?;
        let operation = request.operation();
        let started = Instant::now();
        tracing::debug!(
            event = "tahrirchi.analyze.started",
            backend = self.backend.name(),
            model = %self.config.model,
            operation = %operation,
            language = %request.language(),
            input_chars = request.text().chars().count(),
            "analysis request started"
        );

        let call = GenerateRequest {
            model: self.config.model.clone(),
            contents: request.text().to_string(),
            system_instruction: system_instruction(operation, request.language()),
            response_mime_type: JSON_MIME_TYPE,
            response_schema: response_schema(operation),
            api_key: api_key.clone(),
        };
        let response = match self.backend.generate_content(call).await {
            Ok(response) => response,
            Err(error) => {
                let classified = classify_backend_error(&error);
                tracing::warn!(
                    event = "tahrirchi.analyze.backend_failed",
                    backend = self.backend.name(),
                    operation = %operation,
                    kind = classified.kind().as_str(),
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %api_key.redact(&error.to_string()),
                    "backend call failed"
                );
                return Err(classified);
            }
        };

        let result = parse_payload(
            &self.validator,
            operation,
            request.text(),
            response.text.as_deref(),
        )
        .inspect_err(|error| {
            tracing::warn!(
                event = "tahrirchi.analyze.malformed_response",
                operation = %operation,
                elapsed_ms = started.elapsed().as_millis(),
                reason = error.detail().unwrap_or_default(),
                "backend response rejected"
            );
        })?;
        tracing::info!(
            event = "tahrirchi.analyze.completed",
            operation = %operation,
            language = %request.language(),
            elapsed_ms = started.elapsed().as_millis(),
            corrections = result.as_grammar().map(|g| g.errors.len()),
            "analysis completed"
        );
        Ok(result)
    }

    fn require_api_key(&self) -> Result<&ApiKey, AnalysisError> {
        self.config.api_key.as_ref().ok_or_else(|| {
            AnalysisError::Configuration(format!(
                "{} is missing. Set it in your environment (e.g. {}=...).",
                self.config.api_key_source, self.config.api_key_source
            ))
        })
    }
}

/// Map a transport failure onto the user-facing error taxonomy.
#[must_use]
pub fn classify_backend_error(error: &BackendError) -> AnalysisError {
    match error {
        BackendError::Status { status: 401 | 403, .. } => AnalysisError::Authentication,
        BackendError::Status {
            status: 400,
            status_text,
            message,
        } if reports_invalid_key(status_text.as_deref(), message) => AnalysisError::Authentication,
        BackendError::Status { .. } | BackendError::Timeout | BackendError::Transport(_) => {
            AnalysisError::BackendUnavailable
        }
        BackendError::Decode(reason) => AnalysisError::malformed(reason.clone()),
    }
}

/// Gemini answers a bad key with 400 INVALID_ARGUMENT and an "API key" message.
fn reports_invalid_key(status_text: Option<&str>, message: &str) -> bool {
    status_text == Some("UNAUTHENTICATED")
        || message.contains("API_KEY")
        || message.to_ascii_lowercase().contains("api key")
}
