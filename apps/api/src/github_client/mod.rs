//! GitHub REST client used to summarize an applicant's recent repositories.
//!
//! Only the repository listing is implemented here. The OAuth handshake that
//! produces the access token happens outside this service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::debug;

use crate::analysis::models::{RepoSummary, MAX_REPOSITORIES};
use crate::errors::{AnalysisError, Upstream};

const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("pathpilot-api/", env!("CARGO_PKG_VERSION"));

/// Lists the most recently updated repositories of the token's owner.
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    async fn recent_repositories(
        &self,
        login: &str,
        token: &str,
    ) -> Result<Vec<RepoSummary>, AnalysisError>;
}

/// Subset of the GitHub repository object we read.
#[derive(Debug, Deserialize)]
struct GithubRepo {
    name: String,
    description: Option<String>,
    language: Option<String>,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build GitHub HTTP client")?;
        Ok(Self {
            client,
            base_url: GITHUB_API_URL.to_string(),
        })
    }

    /// Points the client at a local server, bypassing any system proxy.
    #[cfg(test)]
    fn with_base_url(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .unwrap();
        Self { client, base_url }
    }
}

#[async_trait]
impl RepositoryLister for GithubClient {
    async fn recent_repositories(
        &self,
        login: &str,
        token: &str,
    ) -> Result<Vec<RepoSummary>, AnalysisError> {
        let per_page = MAX_REPOSITORIES.to_string();
        let response = self
            .client
            .get(format!("{}/user/repos", self.base_url))
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AnalysisError::transport(Upstream::GitHub, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::transport(Upstream::GitHub, e))?;

        if !status.is_success() {
            return Err(AnalysisError::UpstreamApi {
                upstream: Upstream::GitHub,
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let repos = parse_repositories(&body)?;
        debug!(login, repo_count = repos.len(), "Fetched GitHub repositories");
        Ok(repos)
    }
}

/// Decodes a `/user/repos` body, keeping at most `MAX_REPOSITORIES` in the order GitHub returned.
fn parse_repositories(body: &str) -> Result<Vec<RepoSummary>, AnalysisError> {
    let repos: Vec<GithubRepo> =
        serde_json::from_str(body).map_err(|e| AnalysisError::UpstreamApi {
            upstream: Upstream::GitHub,
            status: None,
            message: format!("undecodable repository list: {e}"),
        })?;

    Ok(repos
        .into_iter()
        .take(MAX_REPOSITORIES)
        .map(|r| RepoSummary {
            name: r.name,
            description: r.description,
            language: r.language,
        })
        .collect())
}
