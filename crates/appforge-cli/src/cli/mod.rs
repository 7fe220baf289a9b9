//! CLI command definitions and dispatch for the `appforge` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! verb-first pattern (`appforge chat`, `appforge build`, `appforge config
//! set`).

pub mod build;
pub mod chat;
pub mod config;
pub mod preview;
pub mod project;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat-driven app builder with remote APK packaging.
#[derive(Parser)]
#[command(name = "appforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive generation session over a project directory.
    Chat {
        /// Project directory the generated files are written to.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Push the project to the remote host and wait for the APK artifact.
    Build {
        /// Project directory to push.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Download the artifact archive once the build finishes.
        #[arg(long)]
        download: bool,

        /// Where to write the downloaded archive (default: {repo}-bundle.zip).
        #[arg(long, requires = "download")]
        output: Option<PathBuf>,
    },

    /// Assemble the project into a single preview document.
    Preview {
        /// Project directory to assemble.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output file for the assembled document.
        #[arg(short, long, default_value = "preview.html")]
        output: PathBuf,
    },

    /// Manage build settings (owner, repository, access token).
    Config {
        #[command(subcommand)]
        action: config::ConfigCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
