//! GitHub REST implementation of the build host.

mod client;
mod types;

pub use client::GithubBuildHost;
