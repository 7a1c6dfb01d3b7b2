use crate::error::AnalysisError;

use super::{LanguageCode, Operation};

/// One user action: text plus the language and mode to analyze it with.
///
/// Built fresh per action and never persisted. Construction is the only
/// place whitespace-only input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
    language: LanguageCode,
    operation: Operation,
}

impl AnalysisRequest {
    /// Build a request.
    ///
    /// # Errors
    /// Returns [`AnalysisError::EmptyInput`] when `text` is empty or whitespace-only.
    pub fn new(
        text: impl Into<String>,
        language: LanguageCode,
        operation: Operation,
    ) -> Result<Self, AnalysisError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        Ok(Self {
            text,
            language,
            operation,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn language(&self) -> LanguageCode {
        self.language
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }
}
