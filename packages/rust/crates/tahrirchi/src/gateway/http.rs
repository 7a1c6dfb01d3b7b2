//! HTTP gateway: POST /v1/analyze → one analysis → JSON result.
//!
//! Errors come back as `{"error": <kind>, "message": <user-safe text>}`; bodies that
//! fail to parse use the `invalid_request` code.
//! Each request is limited by a timeout so a stuck backend call cannot hold the connection.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::client::AnalysisClient;
use crate::contracts::{AnalysisResult, LanguageCode, Operation};
use crate::error::{AnalysisError, ErrorKind};

/// Default per-request timeout around the single backend call.
pub const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Request body for POST /v1/analyze.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub language: LanguageCode,
    pub operation: Operation,
}

/// Error code for bodies the JSON extractor rejects (bad syntax, unknown language or operation).
const INVALID_REQUEST: &str = "invalid_request";

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    pub model: String,
    pub credential_configured: bool,
    pub request_timeout_secs: u64,
}

#[derive(Clone)]
pub struct GatewayState {
    pub client: Arc<AnalysisClient>,
    pub request_timeout_secs: u64,
}

/// HTTP status for each error kind.
#[must_use]
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyInput => StatusCode::BAD_REQUEST,
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Authentication | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
        ErrorKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(status: StatusCode, error: &AnalysisError) -> Response {
    let body = ErrorResponse {
        error: error.kind().as_str(),
        message: error.to_string(),
    };
    (status, Json(body)).into_response()
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    let body = ErrorResponse {
        error: INVALID_REQUEST,
        message: rejection.body_text(),
    };
    (rejection.status(), Json(body)).into_response()
}

async fn handle_analyze(
    State(state): State<GatewayState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };
    let timeout_secs = state.request_timeout_secs;
    match tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        state
            .client
            .analyze_text(&body.text, body.language, body.operation),
    )
    .await
    {
        Ok(Ok(result)) => Json::<AnalysisResult>(result).into_response(),
        Ok(Err(error)) => error_response(status_for(error.kind()), &error),
        Err(_) => {
            tracing::warn!(
                event = "tahrirchi.gateway.request_timeout",
                timeout_secs,
                operation = %body.operation,
                "analysis request timed out"
            );
            error_response(
                StatusCode::GATEWAY_TIMEOUT,
                &AnalysisError::BackendUnavailable,
            )
        }
    }
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    Json(GatewayHealthResponse {
        status: "healthy",
        model: state.client.config().model.clone(),
        credential_configured: state.client.has_credential(),
        request_timeout_secs: state.request_timeout_secs,
    })
}

/// Build the gateway router (POST /v1/analyze, GET /health).
pub fn router(client: Arc<AnalysisClient>, request_timeout_secs: u64) -> Router {
    let state = GatewayState {
        client,
        request_timeout_secs,
    };
    Router::new()
        .route("/health", get(handle_health))
        .route("/v1/analyze", post(handle_analyze))
        .with_state(state)
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `127.0.0.1:8080`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
pub async fn run_http(
    client: Arc<AnalysisClient>,
    bind_addr: &str,
    request_timeout_secs: Option<u64>,
) -> Result<()> {
    let timeout = request_timeout_secs.unwrap_or(REQUEST_TIMEOUT_SECS);
    if !client.has_credential() {
        tracing::warn!(
            source = %client.config().api_key_source,
            "no API key configured; analyze requests will fail with a configuration error"
        );
    }
    let app = router(client, timeout);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(
        "gateway listening on {} (request_timeout={}s, Ctrl+C/SIGTERM to stop)",
        bind_addr,
        timeout
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to listen for SIGTERM; Ctrl+C only");
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
