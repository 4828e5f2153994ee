use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli_chess::cli::cli_config::CliConfig;
use cli_chess::cli::cli_top::run_stdio_loop;

fn main() -> ExitCode {
    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::parse();

    match run_stdio_loop(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "terminal session failed");
            eprintln!("cli_chess: {err}");
            ExitCode::FAILURE
        }
    }
}
