use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tahrirchi::{LanguageCode, Operation};

#[derive(Parser)]
#[command(name = "tahrirchi")]
#[command(about = "Grammar check or simplify text with a hosted model. One-shot CLI or HTTP gateway.")]
pub(crate) struct Cli {
    /// Override config directory (user settings live in `<conf>/tahrirchi/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Analyze one text. Reads stdin when --text is omitted.
    Analyze {
        /// `grammar-check` or `simplify`.
        #[arg(long, short = 'o', default_value_t = Operation::GrammarCheck)]
        operation: Operation,

        /// Language code (EN, UZ, RU, DE, AR, TR, ZH, ES).
        #[arg(long, short = 'l', default_value_t = LanguageCode::En)]
        language: LanguageCode,

        /// Text to analyze.
        #[arg(long, short = 't')]
        text: Option<String>,

        /// Print the tagged result as JSON instead of plain text.
        #[arg(long)]
        json: bool,

        /// Save the corrected/simplified text to a file (directory from settings or cwd).
        #[arg(long)]
        save: bool,

        /// Directory for the saved file; implies --save.
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Verbose logs (debug-level tracing).
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Run HTTP server (POST /v1/analyze, GET /health). Default bind: 127.0.0.1:8080
    Serve {
        /// Listen address (overrides settings `gateway.bind`).
        #[arg(long)]
        bind: Option<String>,

        /// Per-request timeout in seconds (default: 90).
        #[arg(long)]
        request_timeout: Option<u64>,
    },
    /// List supported language codes.
    Languages,
}
