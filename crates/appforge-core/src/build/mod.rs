//! Remote build orchestration.
//!
//! [`runner::BuildRunner`] drives [`appforge_types::build::BuildState`] from
//! `Idle` through `Pushing`/`Building` to `Done` or `Failed` against any
//! [`host::BuildHost`] implementation. The fixed CI workflow definition it
//! appends to every push lives in [`workflow`].

pub mod host;
pub mod runner;
pub mod workflow;

pub use host::BuildHost;
pub use runner::{BuildOptions, BuildRunner};
