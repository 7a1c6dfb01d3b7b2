//! Gateway namespace: HTTP entrypoint.

mod http;

pub use http::{
    AnalyzeRequest, ErrorResponse, GatewayHealthResponse, GatewayState, REQUEST_TIMEOUT_SECS,
    router, run_http, status_for,
};
