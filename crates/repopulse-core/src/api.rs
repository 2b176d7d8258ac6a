//! Repo detail data access
//!
//! The backend serves one precomputed JSON document per repository. This is
//! a single read; there is no retry and no caching.

use crate::error::{CoreError, Result};
use crate::models::{RepoDetail, RepoId};
use std::future::Future;
use std::time::Duration;

/// Default metrics backend
pub const DEFAULT_API_BASE: &str = "https://oss.x-lab.info/open_digger/github";

/// Source of repository series data
pub trait RepoDataSource: Send + Sync + 'static {
    fn get_repo_detail(&self, repo: &RepoId) -> impl Future<Output = Result<RepoDetail>> + Send;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Honor HTTP(S)_PROXY from the environment
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
            system_proxy: true,
        }
    }
}

/// reqwest-backed [`RepoDataSource`]
#[derive(Debug, Clone)]
pub struct HttpRepoClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpRepoClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("repopulse/", env!("CARGO_PKG_VERSION")));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|source| CoreError::Network {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }

    /// `{base}/{owner}/{name}/meta.json`
    pub fn detail_url(&self, repo: &RepoId) -> String {
        format!(
            "{}/{}/{}/meta.json",
            self.config.base_url.trim_end_matches('/'),
            repo.owner(),
            repo.name()
        )
    }
}

/// Parse a repo detail body
pub fn parse_repo_detail(url: &str, body: &str) -> Result<RepoDetail> {
    serde_json::from_str(body).map_err(|e| CoreError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

impl RepoDataSource for HttpRepoClient {
    async fn get_repo_detail(&self, repo: &RepoId) -> Result<RepoDetail> {
        let url = self.detail_url(repo);
        tracing::debug!(repo = %repo, url = %url, "Fetching repo detail");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| CoreError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| CoreError::Network {
            url: url.clone(),
            source,
        })?;

        let detail = parse_repo_detail(&url, &body)?;
        tracing::info!(
            repo = %repo,
            stars = detail.stars.len(),
            influence = detail.influence.len(),
            "Repo detail loaded"
        );
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_url_strips_trailing_slash() {
        let client = HttpRepoClient::new(ClientConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout: Duration::from_secs(1),
            system_proxy: false,
        })
        .unwrap();
        let repo: RepoId = "tokio-rs/tokio".parse().unwrap();
        assert_eq!(
            client.detail_url(&repo),
            "http://localhost:8080/api/tokio-rs/tokio/meta.json"
        );
    }

    #[test]
    fn test_parse_repo_detail() {
        let body = r#"{"s": [["2023-01-05", 3], ["2023-01-20", 2]], "i": [["2023-01", 1.5]]}"#;
        let detail = parse_repo_detail("u", body).unwrap();
        assert_eq!(detail.stars.len(), 2);
        assert_eq!(detail.influence.events()[0].count, 1.5);
    }

    #[test]
    fn test_parse_repo_detail_error_carries_url() {
        let err = parse_repo_detail("http://x/a/b/meta.json", "<html>").unwrap_err();
        assert!(matches!(err, CoreError::Parse { ref url, .. } if url == "http://x/a/b/meta.json"));
    }
}
