use super::{aggregate, fetch_commits, fetch_commits_concurrent, Leaderboard};
use crate::error::Result;
use crate::hosting::HostingClient;
use crate::identity::AliasTable;
use crate::week::start_of_week;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Builds the weekly leaderboard for a team's repositories.
pub struct IntegrationsService {
    client: Arc<dyn HostingClient>,
    aliases: AliasTable,
    max_concurrency: usize,
}

impl IntegrationsService {
    pub fn new(client: Arc<dyn HostingClient>, aliases: AliasTable) -> Self {
        Self {
            client,
            aliases,
            max_concurrency: 1,
        }
    }

    /// Fetch up to `max_concurrency` repositories at once. `1` keeps fetching sequential.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Leaderboard for commits made since local midnight of the most recent Monday.
    pub async fn get_integrations(
        &self,
        cancel: &CancellationToken,
        owner: &str,
        repos: &[String],
    ) -> Result<Leaderboard> {
        let since = start_of_week().with_timezone(&Utc);
        self.get_integrations_since(cancel, owner, repos, since).await
    }

    pub async fn get_integrations_since(
        &self,
        cancel: &CancellationToken,
        owner: &str,
        repos: &[String],
        since: DateTime<Utc>,
    ) -> Result<Leaderboard> {
        let commits = if self.max_concurrency > 1 && repos.len() > 1 {
            fetch_commits_concurrent(
                Arc::clone(&self.client),
                cancel,
                owner,
                repos,
                since,
                self.max_concurrency,
            )
            .await?
        } else {
            fetch_commits(self.client.as_ref(), cancel, owner, repos, since).await?
        };

        let leaderboard = aggregate(&commits, &self.aliases);
        info!(
            "Leaderboard for {}: {} developers, {} contributions",
            owner,
            leaderboard.len(),
            leaderboard.total()
        );
        Ok(leaderboard)
    }
}
