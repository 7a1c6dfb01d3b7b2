//! In-memory backend for tests: replays a scripted outcome and records calls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{BackendError, GenerateRequest, GenerateResponse, GenerativeBackend};
use crate::client::AnalysisClient;
use crate::config::ClientConfig;
use crate::error::AnalysisError;

/// Backend that always answers with the same outcome.
pub struct ScriptedBackend {
    outcome: Result<GenerateResponse, BackendError>,
    delay: Option<Duration>,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
    /// Answer every call with `body` as the generated text.
    #[must_use]
    pub fn replying(body: &str) -> Arc<Self> {
        Self::with_outcome(Ok(GenerateResponse {
            text: Some(body.to_string()),
        }))
    }

    /// Answer every call with no generated text.
    #[must_use]
    pub fn empty() -> Arc<Self> {
        Self::with_outcome(Ok(GenerateResponse { text: None }))
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn failing(error: BackendError) -> Arc<Self> {
        Self::with_outcome(Err(error))
    }

    /// Answer with `body` only after `delay` has elapsed on the tokio clock.
    #[must_use]
    pub fn stalling(delay: Duration, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(GenerateResponse {
                text: Some(body.to_string()),
            }),
            delay: Some(delay),
            calls: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn with_outcome(outcome: Result<GenerateResponse, BackendError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            delay: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

/// Client over `backend` with `api_key` configured (or none).
///
/// # Errors
/// Propagates [`AnalysisClient::new`] failures.
pub fn scripted_client(
    backend: Arc<ScriptedBackend>,
    api_key: Option<&str>,
) -> Result<AnalysisClient, AnalysisError> {
    let mut config = ClientConfig::default();
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    AnalysisClient::new(config, backend)
}
