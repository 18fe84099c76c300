use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

pub mod reporter;
pub mod table;

pub use reporter::Reporter;

use crate::league::{Leaderboard, Standing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Table => ".txt",
        OutputFormat::Json => ".json",
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

/// Everything a rendered leaderboard shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    pub owner: String,
    pub repos: Vec<String>,
    pub week_start: DateTime<Local>,
    pub generated_at: DateTime<Utc>,
    pub total_contributions: usize,
    pub standings: Vec<Standing>,
}

impl LeaderboardReport {
    pub fn new(
        owner: &str,
        repos: &[String],
        week_start: DateTime<Local>,
        leaderboard: &Leaderboard,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            repos: repos.to_vec(),
            week_start,
            generated_at: Utc::now(),
            total_contributions: leaderboard.total(),
            standings: leaderboard.ranked(),
        }
    }
}
