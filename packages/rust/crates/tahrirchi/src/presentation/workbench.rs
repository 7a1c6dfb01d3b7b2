//! Transient presentation state around the analysis client.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::client::AnalysisClient;
use crate::contracts::{AnalysisResult, LanguageCode, Operation};
use crate::error::{AnalysisError, ErrorKind};
use crate::export::{ExportError, write_artifact};

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Ready {
        input: String,
        result: AnalysisResult,
    },
    Failed {
        kind: ErrorKind,
        message: String,
    },
}

/// Holds at most one result; each `invoke` replaces it.
pub struct Workbench {
    client: Arc<AnalysisClient>,
    state: ViewState,
}

impl Workbench {
    #[must_use]
    pub fn new(client: Arc<AnalysisClient>) -> Self {
        Self {
            client,
            state: ViewState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Run one analysis and record its outcome.
    ///
    /// The previous result is discarded before the call. Taking `&mut self`
    /// keeps at most one call in flight per workbench.
    pub async fn invoke(
        &mut self,
        text: &str,
        language: LanguageCode,
        operation: Operation,
    ) -> &ViewState {
        self.state = ViewState::Idle;
        self.state = match self.client.analyze_text(text, language, operation).await {
            Ok(result) => ViewState::Ready {
                input: text.to_string(),
                result,
            },
            Err(error) => failed(&error),
        };
        &self.state
    }

    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ViewState::Ready { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Text to put on the clipboard: the corrected or simplified text.
    #[must_use]
    pub fn copy_text(&self) -> Option<&str> {
        self.result().map(AnalysisResult::primary_text)
    }

    /// Write the primary text to a timestamped file in `dir`.
    /// Returns `Ok(None)` when there is no result to save.
    ///
    /// # Errors
    /// Returns [`ExportError`] when writing fails.
    pub fn download(&self, dir: &Path) -> Result<Option<PathBuf>, ExportError> {
        self.result()
            .map(|result| write_artifact(result, dir))
            .transpose()
    }

    pub fn clear(&mut self) {
        self.state = ViewState::Idle;
    }
}

fn failed(error: &AnalysisError) -> ViewState {
    ViewState::Failed {
        kind: error.kind(),
        message: error.to_string(),
    }
}
