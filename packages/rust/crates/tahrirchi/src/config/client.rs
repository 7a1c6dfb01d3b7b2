//! Client configuration: backend endpoint, model, timeout and the API key.

use std::fmt;

use super::settings::RuntimeSettings;

/// Default Gemini REST base URL.
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
/// Secondary environment variable consulted when the primary one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// API credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key; blank strings are treated as absent.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        (!value.is_empty()).then_some(Self(value))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of this key in `message` with `***`.
    #[must_use]
    pub fn redact(&self, message: &str) -> String {
        message.replace(self.0.as_str(), "***")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Everything the analysis client needs, passed explicitly at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `None` is legal here; `analyze_text` reports it as a configuration error.
    pub api_key: Option<ApiKey>,
    /// Name of the configuration value the key is read from, used in error messages.
    pub api_key_source: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_source: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Resolve from settings, reading the key from the process environment.
    #[must_use]
    pub fn from_settings(settings: &RuntimeSettings) -> Self {
        Self::from_settings_with(settings, |name| std::env::var(name).ok())
    }

    /// Resolve from settings with an explicit variable lookup (tests pass a map).
    pub fn from_settings_with<F>(settings: &RuntimeSettings, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = &settings.backend;
        let api_key_source = backend
            .api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_API_KEY_ENV)
            .to_string();
        let api_key = lookup(&api_key_source)
            .and_then(ApiKey::new)
            .or_else(|| lookup(FALLBACK_API_KEY_ENV).and_then(ApiKey::new));
        let defaults = Self::default();
        Self {
            api_key,
            api_key_source,
            model: non_empty(backend.model.as_deref()).unwrap_or(defaults.model),
            base_url: non_empty(backend.base_url.as_deref())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout_secs: backend
                .timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(key);
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
