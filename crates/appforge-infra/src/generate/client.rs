//! HttpGenerator -- concrete [`Generator`] implementation over HTTPS.
//!
//! The endpoint is an opaque third-party service: one POST with the prompt,
//! the current bundle, and recent history; one JSON reply back. Anything
//! unexpected (transport failure, non-success status, malformed body)
//! becomes a [`GenerationError`] the chat session degrades to its generic
//! failure reply -- no retry logic lives here.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use appforge_core::chat::Generator;
use appforge_types::bundle::SourceBundle;
use appforge_types::chat::{ChatMessage, GenerationError, GenerationReply};

/// Generation endpoint HTTP client.
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

/// Request body posted to the endpoint.
#[derive(Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    current_files: &'a SourceBundle,
    history: Vec<HistoryEntry<'a>>,
}

#[derive(Serialize)]
struct HistoryEntry<'a> {
    role: String,
    content: &'a str,
}

impl HttpGenerator {
    /// Create a generator for the given endpoint. The optional API key is
    /// sent as a bearer credential.
    pub fn new(endpoint: String, api_key: Option<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            // Generation calls are slow; give them room.
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            endpoint,
            api_key,
        }
    }

    fn to_request<'a>(
        prompt: &'a str,
        bundle: &'a SourceBundle,
        history: &'a [ChatMessage],
    ) -> GenerationRequest<'a> {
        GenerationRequest {
            prompt,
            current_files: bundle,
            history: history
                .iter()
                .map(|m| HistoryEntry {
                    role: m.role.to_string(),
                    content: &m.content,
                })
                .collect(),
        }
    }
}

impl Generator for HttpGenerator {
    async fn generate(
        &self,
        prompt: &str,
        bundle: &SourceBundle,
        history: &[ChatMessage],
    ) -> Result<GenerationReply, GenerationError> {
        let body = Self::to_request(prompt, bundle, history);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| GenerationError::Endpoint {
            message: format!("request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Endpoint {
                message: format!("HTTP {status}: {body}"),
            });
        }

        response
            .json::<GenerationReply>()
            .await
            .map_err(|e| GenerationError::Deserialization(e.to_string()))
    }
}
