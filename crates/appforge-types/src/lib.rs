//! Shared domain types for AppForge.
//!
//! This crate contains the core domain types used across the AppForge
//! workspace: SourceBundle, BuildConfig, BuildState, chat messages, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! and secrecy.

pub mod build;
pub mod bundle;
pub mod chat;
pub mod config;
pub mod error;
