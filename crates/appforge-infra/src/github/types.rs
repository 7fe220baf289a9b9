//! Wire types for the GitHub REST v3 endpoints the build host touches.

use serde::{Deserialize, Serialize};

/// Response of `GET /repos/{owner}/{repo}/contents/{path}` -- only the
/// revision marker matters here.
#[derive(Debug, Deserialize)]
pub struct ContentsResponse {
    pub sha: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub struct PutContentsBody {
    pub message: String,
    /// Base64 of the UTF-8 bytes of the file.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Response of `GET /repos/{owner}/{repo}/actions/artifacts`.
#[derive(Debug, Deserialize)]
pub struct ArtifactList {
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactEntry {
    pub id: u64,
    pub name: String,
    pub archive_download_url: String,
    pub workflow_run: Option<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
}

/// GitHub error payloads carry a human-readable `message`.
#[derive(Debug, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_response_parses_sha() {
        let json = r#"{
            "name": "index.html",
            "path": "index.html",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1",
            "size": 120,
            "type": "file"
        }"#;
        let parsed: ContentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sha, "3d21ec53a331a6f037a91c368710b99387d012c1");
    }

    #[test]
    fn test_put_body_omits_sha_on_create() {
        let body = PutContentsBody {
            message: "Update index.html via AppForge".into(),
            content: "aGVsbG8gd29ybGQ=".into(),
            sha: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("sha"));

        let body = PutContentsBody {
            sha: Some("abc".into()),
            ..body
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"sha\":\"abc\""));
    }

    #[test]
    fn test_artifact_list_parses_github_shape() {
        let json = r#"{
            "total_count": 2,
            "artifacts": [
                {
                    "id": 11,
                    "node_id": "MDg6QXJ0aWZhY3QxMQ==",
                    "name": "app-debug",
                    "size_in_bytes": 4096,
                    "archive_download_url": "https://api.github.com/repos/acme/demo/actions/artifacts/11/zip",
                    "expired": false,
                    "workflow_run": { "id": 77, "head_branch": "main" }
                },
                {
                    "id": 12,
                    "name": "logs",
                    "archive_download_url": "https://api.github.com/repos/acme/demo/actions/artifacts/12/zip",
                    "workflow_run": null
                }
            ]
        }"#;
        let list: ArtifactList = serde_json::from_str(json).unwrap();
        assert_eq!(list.artifacts.len(), 2);
        assert_eq!(list.artifacts[0].name, "app-debug");
        assert_eq!(list.artifacts[0].workflow_run.as_ref().unwrap().id, 77);
        assert!(list.artifacts[1].workflow_run.is_none());
    }

    #[test]
    fn test_empty_artifact_list() {
        let list: ArtifactList = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();
        assert!(list.artifacts.is_empty());
    }

    #[test]
    fn test_error_body_tolerates_any_shape() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message": "Bad credentials"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Bad credentials"));

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
    }
}
