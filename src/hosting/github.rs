use super::{CommitPage, CommitRecord, HostingClient};
use crate::config::GitHubConfig;
use crate::error::{HostingError, LeagueError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// REST client for the GitHub "list commits" endpoint.
pub struct GitHubClient {
    base_url: String,
    token: Option<String>,
    per_page: u32,
    client: Client,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LeagueError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
            per_page: config.per_page.clamp(1, 100),
            client,
        })
    }
}

#[async_trait]
impl HostingClient for GitHubClient {
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
        page: u32,
    ) -> std::result::Result<CommitPage, HostingError> {
        let url = format!("{}/repos/{}/{}/commits", self.base_url, owner, repo);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[
                ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("page", page.to_string()),
                ("per_page", self.per_page.to_string()),
            ]);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let next_page = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_from_link);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(HostingError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let commits = decode_commits(&body)?;

        debug!(
            "GET {} page {} -> {} commits, next page {:?}",
            url,
            page,
            commits.len(),
            next_page
        );

        Ok(CommitPage { commits, next_page })
    }
}

#[derive(Debug, Deserialize)]
struct RepositoryCommit {
    commit: GitCommit,
    author: Option<GitHubUser>,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    author: Option<GitSignature>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitSignature {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    avatar_url: Option<String>,
}

impl From<RepositoryCommit> for CommitRecord {
    fn from(remote: RepositoryCommit) -> Self {
        CommitRecord {
            author_email: remote
                .commit
                .author
                .and_then(|author| author.email)
                .unwrap_or_default(),
            author_avatar: remote
                .author
                .and_then(|user| user.avatar_url)
                .unwrap_or_default(),
            message: remote.commit.message,
        }
    }
}

fn decode_commits(body: &[u8]) -> std::result::Result<Vec<CommitRecord>, HostingError> {
    let remote: Vec<RepositoryCommit> =
        serde_json::from_slice(body).map_err(|e| HostingError::Decode(e.to_string()))?;
    Ok(remote.into_iter().map(CommitRecord::from).collect())
}

/// Page number of the `rel="next"` entry in a `Link` header.
fn next_page_from_link(header: &str) -> Option<u32> {
    header
        .split(',')
        .find(|entry| entry.split(';').skip(1).any(|param| param.trim() == r#"rel="next""#))
        .and_then(|entry| {
            let start = entry.find('<')? + 1;
            let end = entry.find('>')?;
            Url::parse(entry.get(start..end)?).ok()
        })
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
}
