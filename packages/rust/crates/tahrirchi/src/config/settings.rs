//! Runtime settings loader.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/tahrirchi/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "tahrirchi/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Name of the environment variable that holds the API key.
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewaySettings {
    pub bind: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportSettings {
    pub output_dir: Option<String>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            backend: self.backend.merge(overlay.backend),
            gateway: self.gateway.merge(overlay.gateway),
            export: self.export.merge(overlay.export),
        }
    }
}

impl BackendSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            model: overlay.model.or(self.model),
            base_url: overlay.base_url.or(self.base_url),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
            api_key_env: overlay.api_key_env.or(self.api_key_env),
        }
    }
}

impl GatewaySettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bind: overlay.bind.or(self.bind),
            request_timeout_secs: overlay.request_timeout_secs.or(self.request_timeout_secs),
        }
    }
}

impl ExportSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            output_dir: overlay.output_dir.or(self.output_dir),
        }
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

/// `(system, user)` settings file locations for the current environment.
#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let config_home = CONFIG_HOME_OVERRIDE
        .get()
        .cloned()
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    (
        root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH),
        root.join(config_home).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH),
    )
}

/// Merge `user` over `system`. Missing or invalid files contribute nothing.
#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    let system_settings = read_settings_file(system);
    let user_settings = read_settings_file(user);
    // Logged so a missing-key report can be traced to the file that named the variable.
    let names_key_env =
        |layer: &Option<RuntimeSettings>| layer.as_ref().is_some_and(|s| s.backend.api_key_env.is_some());
    let key_env_origin = if names_key_env(&user_settings) {
        user
    } else if names_key_env(&system_settings) {
        system
    } else {
        Path::new("<built-in default>")
    };
    let merged = system_settings
        .unwrap_or_default()
        .merge(user_settings.unwrap_or_default());
    tracing::debug!(
        event = "tahrirchi.settings.loaded",
        system = %system.display(),
        user = %user.display(),
        model = merged.backend.model.as_deref().unwrap_or_default(),
        api_key_env = merged.backend.api_key_env.as_deref().unwrap_or_default(),
        api_key_env_origin = %key_env_origin.display(),
        "runtime settings resolved"
    );
    merged
}

fn read_settings_file(path: &Path) -> Option<RuntimeSettings> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
        Err(error) => {
            tracing::warn!(
                event = "tahrirchi.settings.unreadable",
                path = %path.display(),
                error = %error,
                "settings file unreadable; skipping"
            );
            return None;
        }
    };
    serde_yaml::from_str::<RuntimeSettings>(&raw)
        .inspect_err(|error| {
            tracing::warn!(
                event = "tahrirchi.settings.invalid",
                path = %path.display(),
                error = %error,
                "settings yaml invalid; skipping"
            );
        })
        .ok()
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Point user settings at `<path>/tahrirchi/settings.yaml` (CLI `--conf`).
/// Relative paths resolve against `PRJ_ROOT` or the working directory. First call wins.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if let Err(ignored) = CONFIG_HOME_OVERRIDE.set(path) {
        tracing::warn!(
            ignored = %ignored.display(),
            "config home already set; keeping the first --conf value"
        );
    }
}
