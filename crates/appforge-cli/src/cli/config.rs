//! Config commands: set, show, clear build settings.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Confirm, Input, Password};
use secrecy::ExposeSecret;

use appforge_core::settings::{mask_token, SettingsStore};
use appforge_types::build::BuildConfig;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Set owner, repository, and access token (prompts for anything
    /// not passed as a flag; the token prompt hides input).
    Set {
        /// Remote host account or organization.
        #[arg(long)]
        owner: Option<String>,

        /// Target repository name.
        #[arg(long)]
        repo: Option<String>,
    },

    /// Show the stored settings (token masked).
    Show,

    /// Remove the stored settings.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(state: &AppState, action: ConfigCommand, json: bool) -> Result<()> {
    match action {
        ConfigCommand::Set { owner, repo } => set(state, owner, repo, json).await,
        ConfigCommand::Show => show(state, json).await,
        ConfigCommand::Clear { force } => clear(state, force, json).await,
    }
}

async fn set(
    state: &AppState,
    owner: Option<String>,
    repo: Option<String>,
    json: bool,
) -> Result<()> {
    let existing = state.settings.load().await?;

    let owner = match owner {
        Some(owner) => owner,
        None => Input::new()
            .with_prompt("Remote host account")
            .with_initial_text(existing.as_ref().map(|c| c.owner.clone()).unwrap_or_default())
            .interact_text()?,
    };
    let repo = match repo {
        Some(repo) => repo,
        None => Input::new()
            .with_prompt("Repository")
            .with_initial_text(existing.as_ref().map(|c| c.repo.clone()).unwrap_or_default())
            .interact_text()?,
    };

    // An empty entry keeps the previously stored token.
    let token = Password::new()
        .with_prompt("Access token (leave empty to keep current)")
        .allow_empty_password(true)
        .interact()?;
    let token = if token.trim().is_empty() {
        existing
            .as_ref()
            .map(|c| c.token.expose_secret().to_string())
            .unwrap_or_default()
    } else {
        token
    };

    let config = BuildConfig::new(&owner, &repo, &token);
    state.settings.save(&config).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "saved": true,
                "owner": config.owner,
                "repo": config.repo,
                "token": mask_token(config.token.expose_secret()),
            })
        );
    } else {
        println!(
            "  {} Settings saved for {}/{} ({})",
            style("✓").green().bold(),
            style(&config.owner).bold(),
            style(&config.repo).bold(),
            mask_token(config.token.expose_secret())
        );
    }
    Ok(())
}

async fn show(state: &AppState, json: bool) -> Result<()> {
    let Some(config) = state.settings.load().await? else {
        if json {
            println!("{}", serde_json::json!({ "configured": false }));
        } else {
            println!(
                "  {} No build settings stored. Add them with: {}",
                style("i").blue().bold(),
                style("appforge config set").yellow()
            );
        }
        return Ok(());
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "configured": true,
                "owner": config.owner,
                "repo": config.repo,
                "token": mask_token(config.token.expose_secret()),
            })
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);
    table.add_row(vec![Cell::new("owner"), Cell::new(&config.owner).fg(Color::Cyan)]);
    table.add_row(vec![Cell::new("repo"), Cell::new(&config.repo).fg(Color::Cyan)]);
    table.add_row(vec![
        Cell::new("token"),
        Cell::new(mask_token(config.token.expose_secret())).fg(Color::DarkGrey),
    ]);

    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn clear(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Remove stored build settings?")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    state.settings.clear().await?;

    if json {
        println!("{}", serde_json::json!({ "cleared": true }));
    } else {
        println!("  {} Settings cleared.", style("✓").green().bold());
    }
    Ok(())
}
