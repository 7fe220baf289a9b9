//! ChatSession -- transcript, bundle, and generation round-trips.
//!
//! One session owns one [`SourceBundle`] and its transcript. Each `send`
//! forwards the user text to the [`Generator`] along with the current
//! bundle and a capped slice of recent history, then merges any returned
//! file updates into the bundle. A failed generation call degrades to a
//! generic apologetic reply and leaves the bundle untouched -- the session
//! never surfaces generation errors to the caller.

use tracing::warn;

use appforge_types::bundle::SourceBundle;
use appforge_types::chat::{ChatMessage, FollowupChoice};

use super::generator::Generator;

/// Number of recent messages handed to the generator as context.
const HISTORY_WINDOW: usize = 5;

/// Reply shown when the generation call fails for any reason.
pub const FAILURE_REPLY: &str =
    "Something went wrong while generating. Please try again in a moment.";

/// A chat-driven editing session over one source bundle.
pub struct ChatSession<G> {
    generator: G,
    bundle: SourceBundle,
    messages: Vec<ChatMessage>,
}

impl<G: Generator> ChatSession<G> {
    /// Start a session with the starter bundle and a welcome message
    /// carrying a couple of example prompts.
    pub fn new(generator: G) -> Self {
        Self::with_bundle(generator, SourceBundle::starter())
    }

    /// Start a session over an existing bundle (e.g. loaded from disk).
    pub fn with_bundle(generator: G, bundle: SourceBundle) -> Self {
        let welcome = ChatMessage::assistant(
            "Welcome! Describe the app you want to build and I will generate it for you.",
            vec![
                FollowupChoice {
                    label: "Todo list app".into(),
                    prompt: "Build a todo list app with local storage".into(),
                },
                FollowupChoice {
                    label: "Camera filters".into(),
                    prompt: "Create a camera app with realtime filters".into(),
                },
            ],
        );
        Self {
            generator,
            bundle,
            messages: vec![welcome],
        }
    }

    /// The session transcript, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The current source bundle.
    pub fn bundle(&self) -> &SourceBundle {
        &self.bundle
    }

    /// Assemble the current bundle into a preview document.
    pub fn preview(&self) -> String {
        crate::preview::assemble(&self.bundle)
    }

    /// Send one user message and return the assistant's reply.
    pub async fn send(&mut self, text: &str) -> &ChatMessage {
        let text = text.trim();

        // History excludes the message being sent; the prompt carries it.
        let history: Vec<ChatMessage> = self
            .messages
            .iter()
            .rev()
            .take(HISTORY_WINDOW)
            .rev()
            .cloned()
            .collect();

        self.messages.push(ChatMessage::user(text));

        let reply = match self.generator.generate(text, &self.bundle, &history).await {
            Ok(reply) => {
                if let Some(files) = reply.files {
                    self.apply_files(files);
                }
                ChatMessage::assistant(reply.answer, reply.choices.unwrap_or_default())
            }
            Err(err) => {
                warn!(error = %err, "generation call failed");
                ChatMessage::assistant(FAILURE_REPLY, Vec::new())
            }
        };

        self.messages.push(reply);
        &self.messages[self.messages.len() - 1]
    }

    /// Merge generated files per-key into the bundle. Entries with invalid
    /// paths are skipped rather than poisoning the session.
    fn apply_files(&mut self, files: std::collections::BTreeMap<String, String>) {
        for (path, content) in files {
            if let Err(err) = self.bundle.insert(path.clone(), content) {
                warn!(path = %path, error = %err, "skipping generated file");
            }
        }
    }
}
