//! Weekly commit leaderboard for a team's GitHub repositories.
//!
//! Commits since the most recent Monday are fetched page by page, attributed to
//! their author and first `Co-authored-by:` trailer, folded through an alias
//! table and counted per developer.

pub mod config;
pub mod error;
pub mod hosting;
pub mod identity;
pub mod league;
pub mod output;
pub mod week;

pub use error::{HostingError, LeagueError, Result};
pub use hosting::{CommitPage, CommitRecord, GitHubClient, HostingClient};
pub use identity::{extract_co_author, resolve, AliasTable, Developer};
pub use league::{aggregate, fetch_commits, IntegrationsService, Leaderboard, Standing};
pub use week::start_of_week;
