//! BuildRunner -- the remote build state machine.
//!
//! Drives [`BuildState`] from `Idle` through `Pushing` and `Building` to
//! `Done` or `Failed` for one user-triggered build request. State
//! transitions are published through a `tokio::sync::watch` channel so a
//! front end can observe progress without sharing locks; exactly one build
//! sequence may run at a time (a second request is rejected with
//! [`BuildError::InFlight`] while one is running).
//!
//! The push phase writes every bundle file plus the fixed workflow
//! definition sequentially -- remote writes are keyed by revision marker,
//! and parallel writes would race on it. The poll phase is a cancellable
//! repeating timer bounded by [`BuildOptions::max_polls`].

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use appforge_types::build::{BuildArtifactRef, BuildConfig, BuildError, BuildState};
use appforge_types::bundle::SourceBundle;
use appforge_types::config::AppConfig;

use super::host::BuildHost;
use super::workflow;

/// Tuning knobs for the poll loop.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Fixed wait between artifact polls.
    pub poll_interval: Duration,
    /// Poll attempts before the build is declared timed out.
    pub max_polls: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_polls: 90,
        }
    }
}

impl From<&AppConfig> for BuildOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_polls: config.max_polls,
        }
    }
}

/// Remote build orchestrator over a [`BuildHost`].
pub struct BuildRunner<H> {
    host: H,
    options: BuildOptions,
    state: watch::Sender<BuildState>,
    running: tokio::sync::Mutex<()>,
}

impl<H: BuildHost> BuildRunner<H> {
    /// Create a runner with default options.
    pub fn new(host: H) -> Self {
        Self::with_options(host, BuildOptions::default())
    }

    /// Create a runner with explicit poll tuning.
    pub fn with_options(host: H, options: BuildOptions) -> Self {
        let (state, _) = watch::channel(BuildState::Idle);
        Self {
            host,
            options,
            state,
            running: tokio::sync::Mutex::new(()),
        }
    }

    /// The current build state.
    pub fn state(&self) -> BuildState {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<BuildState> {
        self.state.subscribe()
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run one full build sequence: push the bundle and the workflow file,
    /// then poll until the expected artifact appears.
    ///
    /// Rejected with [`BuildError::InFlight`] while a previous sequence is
    /// still running. Any previous `Done`/`Failed` result is cleared when
    /// the new sequence starts. Cancellation stops the sequence promptly
    /// and resets the state to `Idle`.
    pub async fn run(
        &self,
        config: &BuildConfig,
        bundle: &SourceBundle,
        cancel: &CancellationToken,
    ) -> Result<BuildArtifactRef, BuildError> {
        let Ok(_guard) = self.running.try_lock() else {
            return Err(BuildError::InFlight);
        };

        match self.drive(config, bundle, cancel).await {
            Ok(artifact) => {
                info!(owner = %config.owner, repo = %config.repo, "build finished");
                self.state.send_replace(BuildState::Done(artifact.clone()));
                Ok(artifact)
            }
            Err(BuildError::Cancelled) => {
                debug!(repo = %config.repo, "build cancelled");
                self.state.send_replace(BuildState::Idle);
                Err(BuildError::Cancelled)
            }
            Err(err) => {
                warn!(repo = %config.repo, error = %err, "build failed");
                self.state.send_replace(BuildState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn drive(
        &self,
        config: &BuildConfig,
        bundle: &SourceBundle,
        cancel: &CancellationToken,
    ) -> Result<BuildArtifactRef, BuildError> {
        // Never touch the network with an incomplete config.
        if !config.is_complete() {
            return Err(BuildError::ConfigMissing);
        }

        self.state.send_replace(BuildState::Pushing);

        self.host.probe(config).await?;

        for (path, content) in bundle.iter() {
            self.push_file(config, path, content, cancel).await?;
        }
        // The fixed workflow file goes last, overwriting any prior version.
        self.push_file(config, workflow::WORKFLOW_PATH, workflow::WORKFLOW_YAML, cancel)
            .await?;

        // Building is only entered once every write has succeeded.
        self.state.send_replace(BuildState::Building);

        self.poll_for_artifact(config, cancel).await
    }

    /// Lookup-revision-then-put: an existing file's marker keys the update;
    /// a missing file is created.
    async fn push_file(
        &self,
        config: &BuildConfig,
        path: &str,
        content: &str,
        cancel: &CancellationToken,
    ) -> Result<(), BuildError> {
        if cancel.is_cancelled() {
            return Err(BuildError::Cancelled);
        }

        let revision = self.host.file_revision(config, path).await?;
        self.host
            .write_file(config, path, content, revision.as_deref())
            .await?;
        debug!(path, update = revision.is_some(), "pushed file");
        Ok(())
    }

    async fn poll_for_artifact(
        &self,
        config: &BuildConfig,
        cancel: &CancellationToken,
    ) -> Result<BuildArtifactRef, BuildError> {
        for attempt in 1..=self.options.max_polls {
            let listing = tokio::select! {
                _ = cancel.cancelled() => return Err(BuildError::Cancelled),
                listing = self.host.artifacts(config) => listing,
            };

            match listing {
                Ok(artifacts) => {
                    if let Some(found) = workflow::select_artifact(&artifacts) {
                        info!(attempt, name = %found.name, "build artifact found");
                        return Ok(found.artifact.clone());
                    }
                    debug!(attempt, "no matching artifact yet");
                }
                // A transient poll failure is not distinguished from "not
                // yet built": both consume one attempt and wait the same
                // interval.
                Err(err) => warn!(attempt, error = %err, "artifact poll failed"),
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(BuildError::Cancelled),
                _ = tokio::time::sleep(self.options.poll_interval) => {}
            }
        }

        Err(BuildError::Timeout {
            attempts: self.options.max_polls,
        })
    }

    /// Fetch a finished artifact's archive bytes. Recoverable by retrying
    /// the download alone; the build itself does not need to be rerun.
    pub async fn download(
        &self,
        config: &BuildConfig,
        artifact: &BuildArtifactRef,
    ) -> Result<Vec<u8>, BuildError> {
        self.host.fetch_artifact(config, &artifact.download_url).await
    }
}
