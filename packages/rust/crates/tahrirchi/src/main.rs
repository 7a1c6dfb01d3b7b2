//! tahrirchi CLI: one-shot analysis, HTTP gateway, or language list.
//!
//! The API key is read from the environment variable named in settings
//! (`backend.api_key_env`, default `API_KEY`, fallback `GEMINI_API_KEY`).
//!
//! Logging: set `RUST_LOG=tahrirchi=debug` to see request logs on stderr.

mod cli;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tahrirchi::{
    AnalysisClient, ClientConfig, LanguageCode, Operation, RuntimeSettings, ViewState, Workbench,
    load_runtime_settings, render_result, set_config_home_override,
};

use crate::cli::{Cli, Command};

const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose on analyze => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let verbose = matches!(&cli.command, Command::Analyze { verbose: true, .. });
        EnvFilter::new(if verbose {
            "tahrirchi=debug"
        } else {
            "tahrirchi=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_runtime_settings();

    match cli.command {
        Command::Analyze {
            operation,
            language,
            text,
            json,
            save,
            save_dir,
            verbose: _,
        } => {
            let save_dir = save_dir.or_else(|| save.then(|| default_save_dir(&settings)));
            run_analyze(&settings, operation, language, text, json, save_dir).await
        }
        Command::Serve {
            bind,
            request_timeout,
        } => {
            let client = Arc::new(AnalysisClient::gemini(ClientConfig::from_settings(
                &settings,
            ))?);
            let bind = bind
                .or_else(|| settings.gateway.bind.clone())
                .unwrap_or_else(|| DEFAULT_BIND.to_string());
            let timeout = request_timeout.or(settings.gateway.request_timeout_secs);
            tahrirchi::run_http(client, &bind, timeout).await
        }
        Command::Languages => {
            for language in LanguageCode::ALL {
                println!("{}\t{}", language.code(), language.display_name());
            }
            Ok(())
        }
    }
}

async fn run_analyze(
    settings: &RuntimeSettings,
    operation: Operation,
    language: LanguageCode,
    text: Option<String>,
    json: bool,
    save_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };
    let client = AnalysisClient::gemini(ClientConfig::from_settings(settings))?;
    let mut workbench = Workbench::new(Arc::new(client));
    match workbench.invoke(&text, language, operation).await {
        ViewState::Ready { input, result } => {
            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", render_result(result, input));
            }
        }
        ViewState::Failed { message, .. } => bail!("{message}"),
        ViewState::Idle => bail!("analysis produced no result"),
    }
    if let Some(dir) = save_dir
        && let Some(path) = workbench.download(&dir)?
    {
        eprintln!("saved to {}", path.display());
    }
    Ok(())
}

fn default_save_dir(settings: &RuntimeSettings) -> PathBuf {
    settings
        .export
        .output_dir
        .as_deref()
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}
