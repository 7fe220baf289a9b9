//! HTTP client for the generation endpoint.

mod client;

pub use client::HttpGenerator;
