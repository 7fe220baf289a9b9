//! GithubBuildHost -- concrete [`BuildHost`] implementation for the GitHub
//! REST API.
//!
//! Push writes go through the contents API (lookup the current SHA, then
//! PUT base64 content keyed by it); artifact polling reads the Actions
//! artifacts listing. The access token lives in the [`BuildConfig`] as a
//! [`secrecy::SecretString`] and only surfaces while request headers are
//! built.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use tracing::debug;

use appforge_core::build::BuildHost;
use appforge_types::build::{BuildArtifactRef, BuildConfig, BuildError, NamedArtifact};

use super::types::{ApiErrorBody, ArtifactList, ContentsResponse, PutContentsBody};

/// GitHub REST build host.
pub struct GithubBuildHost {
    client: reqwest::Client,
    api_base: String,
    web_base: String,
}

impl GithubBuildHost {
    /// API version header value.
    const API_VERSION: &'static str = "2022-11-28";

    /// Create a host pointed at github.com.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            // GitHub rejects requests without a User-Agent.
            .user_agent("appforge")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_base: "https://api.github.com".to_string(),
            web_base: "https://github.com".to_string(),
        }
    }

    /// Override both base URLs (useful for testing or GHES deployments).
    pub fn with_base_urls(mut self, api_base: String, web_base: String) -> Self {
        self.api_base = api_base;
        self.web_base = web_base;
        self
    }

    fn repo_url(&self, config: &BuildConfig) -> String {
        format!("{}/repos/{}/{}", self.api_base, config.owner, config.repo)
    }

    fn contents_url(&self, config: &BuildConfig, path: &str) -> String {
        format!("{}/contents/{}", self.repo_url(config), path)
    }

    /// A request with the standard headers every call carries.
    fn request(&self, method: Method, url: &str, config: &BuildConfig) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("token {}", config.token.expose_secret()))
            .header("Accept", "application/vnd.github.v3+json")
            .header("X-GitHub-Api-Version", Self::API_VERSION)
    }

    /// Pull the `message` out of a GitHub error payload, falling back to
    /// the status line.
    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        match body.message {
            Some(message) => format!("HTTP {}: {message}", status.as_u16()),
            None => format!("HTTP {}", status.as_u16()),
        }
    }
}

impl Default for GithubBuildHost {
    fn default() -> Self {
        Self::new()
    }
}

/// The contents API requires base64 of the file's UTF-8 bytes; encoding
/// the bytes (not code points) keeps multi-byte text intact.
fn encode_content(content: &str) -> String {
    BASE64.encode(content.as_bytes())
}

/// Map a listing entry set into named artifacts with both URL forms.
fn to_named_artifacts(
    list: ArtifactList,
    config: &BuildConfig,
    web_base: &str,
) -> Vec<NamedArtifact> {
    list.artifacts
        .into_iter()
        .map(|entry| {
            let human_url = match &entry.workflow_run {
                Some(run) => format!(
                    "{web_base}/{}/{}/actions/runs/{}/artifacts/{}",
                    config.owner, config.repo, run.id, entry.id
                ),
                // No run attached; point at the actions overview instead.
                None => format!("{web_base}/{}/{}/actions", config.owner, config.repo),
            };
            NamedArtifact {
                name: entry.name,
                artifact: BuildArtifactRef {
                    download_url: entry.archive_download_url,
                    human_url,
                },
            }
        })
        .collect()
}

impl BuildHost for GithubBuildHost {
    async fn probe(&self, config: &BuildConfig) -> Result<(), BuildError> {
        let response = self
            .request(Method::GET, &self.repo_url(config), config)
            .send()
            .await
            .map_err(|e| BuildError::Connection {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = Self::error_detail(response).await;
        match status {
            StatusCode::UNAUTHORIZED => Err(BuildError::AuthOrAccess {
                status: 401,
                message: detail,
            }),
            StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Err(BuildError::AuthOrAccess {
                status: status.as_u16(),
                message: detail,
            }),
            _ => Err(BuildError::Connection { detail }),
        }
    }

    async fn file_revision(
        &self,
        config: &BuildConfig,
        path: &str,
    ) -> Result<Option<String>, BuildError> {
        let response = self
            .request(Method::GET, &self.contents_url(config, path), config)
            .send()
            .await
            .map_err(|e| BuildError::Connection {
                detail: e.to_string(),
            })?;

        // Any lookup miss (most commonly 404) means "create on write".
        if !response.status().is_success() {
            return Ok(None);
        }

        let contents: ContentsResponse =
            response.json().await.map_err(|e| BuildError::Push {
                path: path.to_string(),
                detail: format!("failed to parse contents response: {e}"),
            })?;
        Ok(Some(contents.sha))
    }

    async fn write_file(
        &self,
        config: &BuildConfig,
        path: &str,
        content: &str,
        revision: Option<&str>,
    ) -> Result<(), BuildError> {
        let body = PutContentsBody {
            message: format!("Update {path} via AppForge"),
            content: encode_content(content),
            sha: revision.map(String::from),
        };

        let response = self
            .request(Method::PUT, &self.contents_url(config, path), config)
            .json(&body)
            .send()
            .await
            .map_err(|e| BuildError::Connection {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            let detail = Self::error_detail(response).await;
            return Err(BuildError::Push {
                path: path.to_string(),
                detail,
            });
        }

        debug!(path, "wrote file to remote repository");
        Ok(())
    }

    async fn artifacts(&self, config: &BuildConfig) -> Result<Vec<NamedArtifact>, BuildError> {
        let url = format!("{}/actions/artifacts", self.repo_url(config));
        let response = self
            .request(Method::GET, &url, config)
            .send()
            .await
            .map_err(|e| BuildError::Poll {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BuildError::Poll {
                detail: Self::error_detail(response).await,
            });
        }

        let list: ArtifactList = response.json().await.map_err(|e| BuildError::Poll {
            detail: format!("failed to parse artifact listing: {e}"),
        })?;

        Ok(to_named_artifacts(list, config, &self.web_base))
    }

    async fn fetch_artifact(
        &self,
        config: &BuildConfig,
        url: &str,
    ) -> Result<Vec<u8>, BuildError> {
        let response = self
            .request(Method::GET, url, config)
            .send()
            .await
            .map_err(|e| BuildError::Download {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BuildError::Download {
                detail: Self::error_detail(response).await,
            });
        }

        let bytes = response.bytes().await.map_err(|e| BuildError::Download {
            detail: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}
