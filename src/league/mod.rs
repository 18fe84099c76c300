use crate::identity::Developer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod aggregate;
pub mod fetch;
pub mod service;

pub use aggregate::aggregate;
pub use fetch::{fetch_commits, fetch_commits_concurrent};
pub use service::IntegrationsService;

/// Commits per developer for the current week. Every count is at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: HashMap<Developer, usize>,
}

/// One leaderboard row in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub avatar: String,
    pub commits: usize,
}

impl Leaderboard {
    pub fn new(entries: HashMap<Developer, usize>) -> Self {
        Self {
            entries: entries.into_iter().filter(|(_, count)| *count > 0).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count for the developer with this canonical name.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(developer, _)| developer.name == name)
            .map(|(_, count)| *count)
    }

    pub fn developer(&self, name: &str) -> Option<&Developer> {
        self.entries.keys().find(|developer| developer.name == name)
    }

    /// Sum of all counts: every attributed commit and co-authorship.
    pub fn total(&self) -> usize {
        self.entries.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Developer, &usize)> {
        self.entries.iter()
    }

    /// Rows sorted by count (descending), then name. Equal counts share a rank.
    pub fn ranked(&self) -> Vec<Standing> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.name.cmp(&b.0.name)));

        let mut standings = Vec::with_capacity(rows.len());
        let mut rank = 0;
        let mut previous = None;
        for (position, (developer, &commits)) in rows.into_iter().enumerate() {
            if previous != Some(commits) {
                rank = position + 1;
                previous = Some(commits);
            }
            standings.push(Standing {
                rank,
                name: developer.name.clone(),
                avatar: developer.avatar.clone(),
                commits,
            });
        }
        standings
    }
}

impl From<HashMap<Developer, usize>> for Leaderboard {
    fn from(entries: HashMap<Developer, usize>) -> Self {
        Self::new(entries)
    }
}
