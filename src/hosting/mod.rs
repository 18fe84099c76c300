use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HostingError;

pub mod github;

pub use github::GitHubClient;

/// Page numbers are 1-based, matching the hosting API.
pub const FIRST_PAGE: u32 = 1;

/// The slice of a remote commit the league cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_email: String,
    pub author_avatar: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(
        author_email: impl Into<String>,
        author_avatar: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            author_email: author_email.into(),
            author_avatar: author_avatar.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPage {
    pub commits: Vec<CommitRecord>,
    /// `None` when this is the last page.
    pub next_page: Option<u32>,
}

#[async_trait]
pub trait HostingClient: Send + Sync {
    /// Lists one page of commits in `owner/repo` authored at or after `since`.
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: DateTime<Utc>,
        page: u32,
    ) -> Result<CommitPage, HostingError>;
}
