//! Error taxonomy surfaced by the analysis client.
//!
//! Every backend or parse failure is mapped to one of these kinds at the
//! client boundary. Display strings are user-safe: they never carry raw
//! backend diagnostics or credential material.

use serde::Serialize;
use thiserror::Error;

/// Failure of one `analyze_text` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Required configuration (usually the API key) is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The backend rejected the credential.
    #[error("Invalid API key. Please double check your key in Google AI Studio.")]
    Authentication,

    /// Network failure, timeout, 5xx or any other unclassified backend error.
    #[error("Unable to reach the AI engine. Please try again later.")]
    BackendUnavailable,

    /// The backend answered, but not with a payload of the expected shape.
    /// `reason` may quote model output and is for logs only.
    #[error("The AI engine returned an unexpected response. Please try again.")]
    MalformedResponse { reason: String },

    /// Empty or whitespace-only input; rejected before any backend call.
    #[error("Please enter some text first.")]
    EmptyInput,
}

/// Stable, serializable classification of [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Authentication,
    BackendUnavailable,
    MalformedResponse,
    EmptyInput,
}

impl AnalysisError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Diagnostic detail for logs; never part of the user-facing message.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { reason } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Authentication => ErrorKind::Authentication,
            Self::BackendUnavailable => ErrorKind::BackendUnavailable,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::EmptyInput => ErrorKind::EmptyInput,
        }
    }
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Authentication => "authentication",
            Self::BackendUnavailable => "backend_unavailable",
            Self::MalformedResponse => "malformed_response",
            Self::EmptyInput => "empty_input",
        }
    }
}
