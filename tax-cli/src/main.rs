use std::path::Path;

use clap::Parser;
use tracing::debug;

use tax_cli::cli::{self, Cli};
use tax_cli::config::{AppConfig, DEFAULT_CONFIG_FILE};
use tax_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_default_logging();
    if cli.quiet {
        logging::set_stderr_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_optional(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    // `--log-level` beats the config file, which beats RUST_LOG.
    if let Some(level) = cli.log_level.as_deref().or(config.log_level.as_deref()) {
        logging::set_log_level(level)?;
    }
    debug!(command = ?cli.command, "starting");

    let output = cli::run(&cli, &config)?;
    print!("{output}");

    Ok(())
}
