use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    /// A page request for `repo` failed. The whole fetch is aborted.
    #[error("couldn't get commits for {repo}: {source}")]
    Fetch {
        repo: String,
        #[source]
        source: HostingError,
    },
    #[error("commit fetch was cancelled")]
    Cancelled,
    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl LeagueError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LeagueError::Cancelled)
    }
}

/// Failure reported by a hosting client for a single page request.
#[derive(Error, Debug)]
pub enum HostingError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}
