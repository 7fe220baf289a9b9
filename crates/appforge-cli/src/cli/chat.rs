//! Interactive chat command: prompt, generate, persist, repeat.

use std::path::Path;

use anyhow::Result;
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use appforge_core::chat::ChatSession;
use appforge_infra::generate::HttpGenerator;
use appforge_types::chat::ChatMessage;

use crate::cli::project;
use crate::state::AppState;

/// Env var holding the generation endpoint API key.
const GENERATE_KEY_ENV: &str = "APPFORGE_GENERATE_KEY";

/// Run the interactive session loop over a project directory.
///
/// Generated files are written back to `dir` after every reply, so
/// `appforge preview` and `appforge build` in another terminal always see
/// the latest state. `/preview` assembles the current bundle, `/files`
/// lists it, `/quit` leaves. A bare number picks that follow-up choice
/// from the last reply.
pub async fn chat(state: &AppState, dir: &Path) -> Result<()> {
    let api_key = std::env::var(GENERATE_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from);
    let generator = HttpGenerator::new(state.config.generate_url.clone(), api_key);

    let existing = project::load_bundle(dir)?;
    let mut session = if existing.is_empty() {
        ChatSession::new(generator)
    } else {
        ChatSession::with_bundle(generator, existing)
    };

    println!();
    if let Some(welcome) = session.messages().last() {
        print_reply(welcome);
    }

    loop {
        let line: String = Input::new().with_prompt("you").interact_text()?;
        let line = line.trim().to_string();

        let text = match line.as_str() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/files" => {
                for path in session.bundle().paths() {
                    println!("  {}", style(path).cyan());
                }
                continue;
            }
            "/preview" => {
                let target = dir.join("preview.html");
                tokio::fs::write(&target, session.preview()).await?;
                println!(
                    "  {} Wrote {}",
                    style("✓").green().bold(),
                    style(target.display()).bold()
                );
                continue;
            }
            other => match resolve_choice(session.messages().last(), other) {
                Some(prompt) => prompt,
                None => other.to_string(),
            },
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("  {spinner} {msg}").expect("valid template"));
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));
        spinner.set_message("Generating...");

        let reply = session.send(&text).await.clone();
        spinner.finish_and_clear();

        print_reply(&reply);
        project::write_bundle(dir, session.bundle()).await?;
    }

    Ok(())
}

/// A bare number selects the corresponding follow-up choice of the last
/// assistant message.
fn resolve_choice(last: Option<&ChatMessage>, input: &str) -> Option<String> {
    let index: usize = input.parse().ok()?;
    let choices = &last?.choices;
    choices.get(index.checked_sub(1)?).map(|c| c.prompt.clone())
}

fn print_reply(message: &ChatMessage) {
    println!();
    println!("{}", message.content);
    if !message.choices.is_empty() {
        println!();
        for (index, choice) in message.choices.iter().enumerate() {
            println!(
                "  {} {}",
                style(format!("[{}]", index + 1)).cyan().bold(),
                choice.label
            );
        }
    }
    println!();
}
