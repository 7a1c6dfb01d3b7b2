//! Config namespace: client configuration and YAML runtime settings.

mod client;
mod settings;

pub use client::{
    ApiKey, ClientConfig, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, FALLBACK_API_KEY_ENV,
    GEMINI_DEFAULT_BASE_URL,
};
pub use settings::{
    BackendSettings, ExportSettings, GatewaySettings, RuntimeSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
