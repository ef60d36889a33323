//! GitHub-backed document store.
//!
//! Documents are YAML files under one directory of a GitHub repository.
//! Reads go through the raw-content host; writes and directory listings
//! go through the contents API. A write needs the current blob SHA of
//! the file (the revision token); writing without one creates the file.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for the remote document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API token with contents read/write access.
    pub token: String,
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Branch the raw-content reads resolve against.
    pub branch: String,
    /// Directory inside the repository holding the documents, with a
    /// trailing slash.
    pub data_dir: String,
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `GITHUB_TOKEN`: API token
    /// - `GITHUB_REPO`: repository in `owner/name` form
    ///
    /// Optional:
    /// - `GITHUB_BRANCH`: branch name (default: "main")
    /// - `DATA_DIR`: document directory (default: "data/")
    pub fn from_env() -> StoreResult<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| StoreError::Config("GITHUB_TOKEN environment variable not set".into()))?;
        let repo = std::env::var("GITHUB_REPO")
            .map_err(|_| StoreError::Config("GITHUB_REPO environment variable not set".into()))?;
        let branch = std::env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string());
        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data/".to_string());

        Ok(Self {
            token,
            repo,
            branch,
            data_dir: normalize_dir(&data_dir),
        })
    }
}

/// Ensure a directory path ends with exactly one slash.
fn normalize_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

/// Opaque revision token: the blob SHA the store expects on overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns true for names with a structured-document extension.
#[must_use]
pub fn is_document_name(name: &str) -> bool {
    name.ends_with(".yaml") || name.ends_with(".yml")
}

// ============================================================================
// Wire types
// ============================================================================

/// Subset of the contents-API file metadata we read.
#[derive(Debug, Deserialize)]
struct ContentMeta {
    name: String,
    sha: String,
}

/// Body of a contents-API write.
#[derive(Debug, Serialize)]
struct WriteRequest {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

// ============================================================================
// Store
// ============================================================================

/// Client for the remote document store.
#[derive(Debug, Clone)]
pub struct Store {
    client: reqwest::Client,
    config: StoreConfig,
}

impl Store {
    /// Build a store client with the API auth headers installed.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("token {}", config.token))
            .map_err(|_| StoreError::Config("GITHUB_TOKEN contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("navstack"));

        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { client, config })
    }

    /// Repository-relative path of one document.
    fn document_path(&self, filename: &str) -> String {
        format!("{}{filename}", self.config.data_dir)
    }

    /// Raw-content URL for direct document reads.
    fn raw_url(&self, filename: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}",
            self.config.repo,
            self.config.branch,
            self.document_path(filename)
        )
    }

    /// Contents-API URL for a repository path.
    fn contents_url(&self, path: &str) -> String {
        format!("https://api.github.com/repos/{}/contents/{path}", self.config.repo)
    }

    /// Fetches one document's text.
    ///
    /// A clean 404 maps to [`StoreError::NotFound`]; any other
    /// non-success status is an upstream error.
    pub async fn fetch_document(&self, filename: &str) -> StoreResult<String> {
        let url = self.raw_url(filename);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(filename.to_string())),
            status if status.is_success() => Ok(response.text().await?),
            status => Err(StoreError::Upstream {
                status: status.as_u16(),
                path: self.document_path(filename),
            }),
        }
    }

    /// Fetches the current revision token of a document, `None` when the
    /// document does not exist yet.
    pub async fn fetch_revision(&self, filename: &str) -> StoreResult<Option<Revision>> {
        let path = self.document_path(filename);
        let response = self.client.get(self.contents_url(&path)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let meta: ContentMeta = response.json().await?;
                Ok(Some(Revision(meta.sha)))
            }
            status => Err(StoreError::Upstream {
                status: status.as_u16(),
                path,
            }),
        }
    }

    /// Writes a document: `Some(revision)` overwrites that revision,
    /// `None` creates the file. A stale revision maps to
    /// [`StoreError::Conflict`].
    pub async fn write_document(
        &self,
        filename: &str,
        content: &str,
        revision: Option<&Revision>,
    ) -> StoreResult<()> {
        let path = self.document_path(filename);
        let action = if revision.is_some() { "Update" } else { "Create" };
        let body = WriteRequest {
            message: format!("{action} {path}"),
            content: BASE64.encode(content),
            sha: revision.map(|r| r.0.clone()),
        };

        let response = self
            .client
            .put(self.contents_url(&path))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                tracing::debug!(%path, action, "document written");
                Ok(())
            }
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(StoreError::Conflict(path))
            }
            status => Err(StoreError::Upstream {
                status: status.as_u16(),
                path,
            }),
        }
    }

    /// Read-revision-then-write convenience used by the mutating request
    /// handlers. No conflict retry: concurrent writers race and the
    /// later write wins.
    pub async fn upload_document(&self, filename: &str, content: &str) -> StoreResult<()> {
        let revision = self.fetch_revision(filename).await?;
        self.write_document(filename, content, revision.as_ref()).await
    }

    /// Lists document names in the store directory, filtered to
    /// structured-data extensions.
    pub async fn list_documents(&self) -> StoreResult<Vec<String>> {
        let dir = self.config.data_dir.trim_end_matches('/');
        let response = self.client.get(self.contents_url(dir)).send().await?;

        match response.status() {
            status if status.is_success() => {
                let entries: Vec<ContentMeta> = response.json().await?;
                Ok(entries
                    .into_iter()
                    .map(|meta| meta.name)
                    .filter(|name| is_document_name(name))
                    .collect())
            }
            status => Err(StoreError::Upstream {
                status: status.as_u16(),
                path: dir.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            token: "t0ken".to_string(),
            repo: "owner/site".to_string(),
            branch: "main".to_string(),
            data_dir: "data/".to_string(),
        }
    }

    #[test]
    fn raw_url_joins_repo_branch_and_data_dir() {
        let store = Store::new(config()).unwrap();
        assert_eq!(
            store.raw_url("nav.yml"),
            "https://raw.githubusercontent.com/owner/site/main/data/nav.yml"
        );
    }

    #[test]
    fn contents_url_targets_the_api_host() {
        let store = Store::new(config()).unwrap();
        assert_eq!(
            store.contents_url(&store.document_path("nav.yml")),
            "https://api.github.com/repos/owner/site/contents/data/nav.yml"
        );
    }

    #[test]
    fn normalize_dir_forces_single_trailing_slash() {
        assert_eq!(normalize_dir("data"), "data/");
        assert_eq!(normalize_dir("data//"), "data/");
        assert_eq!(normalize_dir("data/"), "data/");
        assert_eq!(normalize_dir(""), "");
        assert_eq!(normalize_dir("/"), "");
    }

    #[test]
    fn document_name_filter_accepts_yaml_extensions_only() {
        assert!(is_document_name("nav.yaml"));
        assert!(is_document_name("nav.yml"));
        assert!(!is_document_name("nav.json"));
        assert!(!is_document_name("yaml"));
        assert!(!is_document_name("README.md"));
    }

    #[test]
    fn write_request_omits_sha_on_create() {
        let body = WriteRequest {
            message: "Create data/nav.yml".to_string(),
            content: BASE64.encode("---\n"),
            sha: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
        assert_eq!(json["message"], "Create data/nav.yml");
    }
}
