//! Build command: push the project and wait for the APK artifact.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use appforge_core::build::{BuildOptions, BuildRunner};
use appforge_core::settings::SettingsStore;
use appforge_infra::github::GithubBuildHost;
use appforge_types::build::{BuildArtifactRef, BuildConfig, BuildError, BuildState};

use crate::cli::project;
use crate::state::AppState;

/// Run one build sequence with live progress, optionally downloading the
/// finished artifact archive.
pub async fn build(
    state: &AppState,
    dir: &Path,
    download: bool,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let Some(config) = state.settings.load().await? else {
        println!(
            "  {} No build settings yet. Run {} first.",
            style("i").blue().bold(),
            style("appforge config set").yellow()
        );
        return Ok(());
    };

    let bundle = project::load_bundle(dir)?;
    if bundle.is_empty() {
        anyhow::bail!("no project files found in {}", dir.display());
    }

    let runner = Arc::new(BuildRunner::with_options(
        GithubBuildHost::new(),
        BuildOptions::from(&state.config),
    ));

    // Ctrl+C stops the poll loop instead of killing the process mid-push.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("  {spinner} {msg}").expect("valid template"));
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message("Starting build...");
        bar
    };

    let mut states = runner.subscribe();
    let mut run = {
        let runner = Arc::clone(&runner);
        let config = config.clone();
        let bundle = bundle.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { runner.run(&config, &bundle, &cancel).await })
    };

    let result = loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_ok() {
                    spinner.set_message(progress_message(&states.borrow()));
                }
            }
            joined = &mut run => break joined?,
        }
    };

    match result {
        Ok(artifact) => {
            spinner.finish_and_clear();
            report_done(&config, &artifact, json);
            if download {
                download_artifact(&runner, &config, &artifact, output, json).await?;
            }
            Ok(())
        }
        Err(BuildError::Cancelled) => {
            spinner.finish_and_clear();
            if !json {
                println!("  {} Build cancelled.", style("✗").yellow().bold());
            }
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            Err(err.into())
        }
    }
}

fn progress_message(state: &BuildState) -> String {
    match state {
        BuildState::Pushing => "Pushing project files to the repository...".to_string(),
        BuildState::Building => {
            "Remote build running (this can take several minutes)...".to_string()
        }
        other => other.to_string(),
    }
}

fn report_done(config: &BuildConfig, artifact: &BuildArtifactRef, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "state": "done",
                "download_url": artifact.download_url,
                "human_url": artifact.human_url,
                "archive_name": config.archive_name(),
            })
        );
        return;
    }

    println!();
    println!("  {} Build finished.", style("✓").green().bold());
    println!();
    println!("  View:     {}", style(&artifact.human_url).cyan());
    println!("  Download: {}", style(&artifact.download_url).dim());
    println!();
}

async fn download_artifact<H: appforge_core::build::BuildHost>(
    runner: &BuildRunner<H>,
    config: &BuildConfig,
    artifact: &BuildArtifactRef,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let target = output.unwrap_or_else(|| PathBuf::from(config.archive_name()));
    let bytes = runner.download(config, artifact).await?;
    tokio::fs::write(&target, &bytes).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "downloaded": true,
                "path": target.display().to_string(),
                "bytes": bytes.len(),
            })
        );
    } else {
        println!(
            "  {} Saved {} ({} bytes)",
            style("✓").green().bold(),
            style(target.display()).bold(),
            bytes.len()
        );
    }
    Ok(())
}
