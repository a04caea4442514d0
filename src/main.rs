//! Htmlive - a terminal live HTML editor with preview and validation.
//!
//! # Usage
//!
//! ```bash
//! htmlive page.html
//! htmlive --no-lint page.html
//! htmlive --debounce-ms 500
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use htmlive::app::App;
use htmlive::config::{
    global_config_path, load_config_flags, local_override_path, parse_flag_tokens,
};
use htmlive::sync::DEBOUNCE_QUIET_MS;

/// A terminal live HTML editor with preview and validation
#[derive(Parser, Debug)]
#[command(name = "htmlive", version, about, long_about = None)]
struct Cli {
    /// HTML file to open (starts empty when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Disable HTML validation markers
    #[arg(long)]
    no_lint: bool,

    /// Quiet period in milliseconds between the last edit and the
    /// preview update
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    let global_flags = load_config_flags(&global_path)?;
    let local_flags = load_config_flags(&local_path)?;
    let effective = global_flags.union(&local_flags).union(&cli_flags);

    if let Some(file) = &cli.file {
        if !file.to_string_lossy().ends_with(".html") {
            anyhow::bail!("Only .html files can be opened: {}", file.display());
        }
        if !file.exists() {
            anyhow::bail!("File not found: {}", file.display());
        }
    }

    let mut app = App::new(cli.file)
        .with_lint(!effective.no_lint)
        .with_debounce_ms(effective.debounce_ms.unwrap_or(DEBOUNCE_QUIET_MS))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
