//! AppForge CLI entry point.
//!
//! Binary name: `appforge`
//!
//! Parses CLI arguments, initializes the data directory and global config,
//! then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,appforge=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "appforge", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { dir } => {
            cli::chat::chat(&state, &dir).await?;
        }

        Commands::Build {
            dir,
            download,
            output,
        } => {
            cli::build::build(&state, &dir, download, output, cli.json).await?;
        }

        Commands::Preview { dir, output } => {
            cli::preview::preview(&dir, &output, cli.json).await?;
        }

        Commands::Config { action } => {
            cli::config::run(&state, action, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
