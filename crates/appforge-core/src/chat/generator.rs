//! Generator trait definition.
//!
//! The seam between the chat session and the external generation endpoint.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition). The
//! production implementation (`HttpGenerator`) lives in appforge-infra; the
//! endpoint itself is an opaque third-party service and carries no logic of
//! ours.

use appforge_types::bundle::SourceBundle;
use appforge_types::chat::{ChatMessage, GenerationError, GenerationReply};

/// A generation backend: user text plus current project state in, a
/// narrative reply and optional file updates out.
pub trait Generator: Send + Sync {
    /// Generate a reply for `prompt` given the current bundle and the
    /// recent transcript. `history` is already capped by the caller.
    fn generate(
        &self,
        prompt: &str,
        bundle: &SourceBundle,
        history: &[ChatMessage],
    ) -> impl std::future::Future<Output = Result<GenerationReply, GenerationError>> + Send;
}
