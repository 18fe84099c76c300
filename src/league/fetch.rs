use crate::error::{LeagueError, Result};
use crate::hosting::{CommitPage, CommitRecord, HostingClient, FIRST_PAGE};
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, TryStreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Every commit since `since` across `repos`, in repository order then page order.
///
/// The first failing page aborts the whole fetch.
pub async fn fetch_commits(
    client: &dyn HostingClient,
    cancel: &CancellationToken,
    owner: &str,
    repos: &[String],
    since: DateTime<Utc>,
) -> Result<Vec<CommitRecord>> {
    let mut all_commits = Vec::new();

    for repo in repos {
        let commits = fetch_repository(client, cancel, owner, repo, since).await?;
        all_commits.extend(commits);
    }

    info!(
        "Fetched {} commits from {} repositories",
        all_commits.len(),
        repos.len()
    );
    Ok(all_commits)
}

/// Same result as [`fetch_commits`], with up to `max_concurrency` repositories in flight.
pub async fn fetch_commits_concurrent(
    client: Arc<dyn HostingClient>,
    cancel: &CancellationToken,
    owner: &str,
    repos: &[String],
    since: DateTime<Utc>,
    max_concurrency: usize,
) -> Result<Vec<CommitRecord>> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for (index, repo) in repos.iter().enumerate() {
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        let owner = owner.to_string();
        let repo = repo.clone();
        let permit = Arc::clone(&semaphore);

        join_set.spawn(async move {
            let result = match permit.acquire().await {
                Ok(_permit) => {
                    fetch_repository(client.as_ref(), &cancel, &owner, &repo, since).await
                }
                Err(_) => Err(LeagueError::Cancelled),
            };
            (index, result)
        });
    }

    // Per-repository buffers keep the merged result in the caller's order.
    let mut per_repo: Vec<Option<Vec<CommitRecord>>> = (0..repos.len()).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, Ok(commits))) => per_repo[index] = Some(commits),
            Ok((_, Err(e))) => {
                join_set.abort_all();
                return Err(e);
            }
            Err(e) => {
                join_set.abort_all();
                return Err(LeagueError::Task(e));
            }
        }
    }

    let all_commits: Vec<CommitRecord> = per_repo.into_iter().flatten().flatten().collect();
    info!(
        "Fetched {} commits from {} repositories ({} at a time)",
        all_commits.len(),
        repos.len(),
        max_concurrency.max(1)
    );
    Ok(all_commits)
}

async fn fetch_repository(
    client: &dyn HostingClient,
    cancel: &CancellationToken,
    owner: &str,
    repo: &str,
    since: DateTime<Utc>,
) -> Result<Vec<CommitRecord>> {
    info!("Fetching commits for {}/{} since {}", owner, repo, since);

    let mut pages = Box::pin(commit_pages(client, cancel, owner, repo, since));
    let mut commits = Vec::new();
    while let Some(page) = pages.try_next().await? {
        commits.extend(page);
    }

    info!("{}/{}: {} commits", owner, repo, commits.len());
    Ok(commits)
}

/// Lazily requests pages starting at the first, until the client reports no next page.
fn commit_pages<'a>(
    client: &'a dyn HostingClient,
    cancel: &'a CancellationToken,
    owner: &'a str,
    repo: &'a str,
    since: DateTime<Utc>,
) -> impl Stream<Item = Result<Vec<CommitRecord>>> + 'a {
    stream::try_unfold(Some(FIRST_PAGE), move |cursor| async move {
        match cursor {
            None => Ok(None),
            Some(page) => fetch_page(client, cancel, owner, repo, since, page)
                .await
                .map(|CommitPage { commits, next_page }| Some((commits, next_page))),
        }
    })
}

async fn fetch_page(
    client: &dyn HostingClient,
    cancel: &CancellationToken,
    owner: &str,
    repo: &str,
    since: DateTime<Utc>,
    page: u32,
) -> Result<CommitPage> {
    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Cancelled while fetching {}/{} page {}", owner, repo, page);
            return Err(LeagueError::Cancelled);
        }
        response = client.list_commits(owner, repo, since, page) => response,
    };

    let page_data = response.map_err(|source| LeagueError::Fetch {
        repo: repo.to_string(),
        source,
    })?;

    debug!(
        "{}/{} page {}: {} commits, next page {:?}",
        owner,
        repo,
        page,
        page_data.commits.len(),
        page_data.next_page
    );
    Ok(page_data)
}
