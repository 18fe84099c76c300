#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ci_league::{CommitPage, CommitRecord, HostingClient, HostingError};
use std::collections::HashMap;
use std::sync::Mutex;

/// What the scripted client answers for one page.
#[derive(Debug, Clone)]
pub enum Scripted {
    Page(Vec<CommitRecord>),
    Fail(String),
    /// Never answers; only cancellation gets the caller out.
    Hang,
}

/// In-memory `HostingClient` serving pre-scripted pages and recording every request.
#[derive(Default)]
pub struct ScriptedClient {
    repos: HashMap<String, Vec<Scripted>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo(mut self, name: &str, pages: Vec<Scripted>) -> Self {
        self.repos.insert(name.to_string(), pages);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, repo: &str) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == repo)
            .map(|(_, page)| page)
            .collect()
    }
}

#[async_trait]
impl HostingClient for ScriptedClient {
    async fn list_commits(
        &self,
        _owner: &str,
        repo: &str,
        _since: DateTime<Utc>,
        page: u32,
    ) -> Result<CommitPage, HostingError> {
        self.calls.lock().unwrap().push((repo.to_string(), page));

        let pages = self
            .repos
            .get(repo)
            .ok_or_else(|| HostingError::Status {
                status: 404,
                message: format!("no such repository {repo}"),
            })?;
        let index = page as usize - 1;
        let next_page = if index + 1 < pages.len() { Some(page + 1) } else { None };

        match pages.get(index) {
            Some(Scripted::Page(commits)) => Ok(CommitPage {
                commits: commits.clone(),
                next_page,
            }),
            Some(Scripted::Fail(message)) => Err(HostingError::Other(message.clone())),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Ok(CommitPage::default()),
        }
    }
}

pub fn commit(email: &str, message: &str) -> CommitRecord {
    CommitRecord::new(email, format!("https://avatars.example/{email}"), message)
}

pub fn since() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
}

pub fn repos(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
