//! Business logic for AppForge.
//!
//! Contains the preview assembler, the remote build state machine and the
//! `BuildHost` trait it drives, the chat session orchestrator and its
//! `Generator` trait, and the `SettingsStore` trait. Concrete host, endpoint,
//! and storage implementations live in appforge-infra.

pub mod build;
pub mod chat;
pub mod preview;
pub mod settings;
