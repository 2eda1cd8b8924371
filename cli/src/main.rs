mod cli;
mod commands;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan(args) => {
            let settings = Settings::load(cli.config.as_deref()).await?;
            commands::scan(args, &settings).await
        }
        Command::Summarize(args) => commands::summarize_spec(args).await,
        Command::Overlap(args) => commands::overlap(args).await,
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
