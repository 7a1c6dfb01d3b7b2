//! Tahrirchi: grammar correction and text simplification over a hosted model.
//!
//! - **Client**: instruction + output schema per operation, one `generateContent` call,
//!   schema-validated and span-checked result or a classified error.
//! - **Presentation**: workbench state, text rendering, download-as-file; CLI and HTTP gateway.

#![allow(missing_docs)]

mod backend;
mod client;
mod config;
mod contracts;
mod error;
mod export;
mod gateway;
mod presentation;
mod prompts;
mod response;
mod schema;
#[doc(hidden)]
pub mod test_support;

pub use backend::{
    BackendError, GeminiBackend, GenerateRequest, GenerateResponse, GenerativeBackend,
    JSON_MIME_TYPE,
};
pub use client::{AnalysisClient, classify_backend_error};
pub use config::{
    ApiKey, BackendSettings, ClientConfig, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, ExportSettings,
    FALLBACK_API_KEY_ENV, GEMINI_DEFAULT_BASE_URL, GatewaySettings, RuntimeSettings,
    load_runtime_settings, load_runtime_settings_from_paths, runtime_settings_paths,
    set_config_home_override,
};
pub use contracts::{
    AnalysisRequest, AnalysisResult, GrammarError, GrammarResult, LanguageCode, Operation,
    SimplifyResult,
};
pub use error::{AnalysisError, ErrorKind};
pub use export::{ExportError, artifact_file_name, write_artifact, write_artifact_at};
pub use gateway::{
    AnalyzeRequest, ErrorResponse, GatewayHealthResponse, GatewayState, REQUEST_TIMEOUT_SECS,
    router, run_http, status_for,
};
pub use presentation::{NO_ERRORS_MESSAGE, ViewState, Workbench, render_result};
pub use prompts::system_instruction;
pub use schema::{ResponseValidator, response_schema};
