use crate::error::Result;
use crate::identity::AliasTable;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Looked up as `league.toml` (or any format `config` understands) in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "league";

pub const ENV_PREFIX: &str = "LEAGUE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub fetch: FetchConfig,
    pub team: TeamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub per_page: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Repositories fetched at once. `1` fetches them one after another.
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub owner: String,
    pub repos: Vec<String>,
    pub aliases: Vec<Alias>,
}

/// One `identity -> canonical` mapping. Kept as a list so emails never become config keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub identity: String,
    pub canonical: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
            per_page: 100,
            user_agent: concat!("ci-league/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { max_concurrency: 1 }
    }
}

impl TeamConfig {
    pub fn alias_table(&self) -> AliasTable {
        self.aliases
            .iter()
            .map(|alias| (alias.identity.clone(), alias.canonical.clone()))
            .collect()
    }
}

impl Config {
    /// Layers built-in defaults, the config file and `LEAGUE_*` environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("team.repos"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        debug!(
            "Loaded config: owner={:?}, {} repos, {} aliases",
            config.team.owner,
            config.team.repos.len(),
            config.team.aliases.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_target_public_github() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.per_page, 100);
        assert_eq!(config.fetch.max_concurrency, 1);
        assert!(config.team.repos.is_empty());
        assert!(config.team.alias_table().is_empty());
    }

    #[test]
    fn loads_team_and_aliases_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[github]
per_page = 50

[fetch]
max_concurrency = 4

[team]
owner = "acme"
repos = ["api", "web"]

[[team.aliases]]
identity = "bob@x.com"
canonical = "Bob B"

[[team.aliases]]
identity = "Bob@Home.Net"
canonical = "Bob B"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.github.per_page, 50);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.fetch.max_concurrency, 4);
        assert_eq!(config.team.owner, "acme");
        assert_eq!(config.team.repos, vec!["api".to_string(), "web".to_string()]);

        let aliases = config.team.alias_table();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.resolve("bob@x.com"), "Bob B");
        assert_eq!(aliases.resolve("Bob@Home.Net"), "Bob B");
        assert_eq!(aliases.resolve("carol@x.com"), "carol@x.com");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn environment_overrides_file_and_defaults() {
        // Only keys no other test asserts on, since the process env is shared.
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[github]\ntimeout_secs = 60").unwrap();
        std::env::set_var("LEAGUE_GITHUB__TOKEN", "secret");
        std::env::set_var("LEAGUE_GITHUB__TIMEOUT_SECS", "7");

        let loaded = Config::load(Some(file.path()));

        std::env::remove_var("LEAGUE_GITHUB__TOKEN");
        std::env::remove_var("LEAGUE_GITHUB__TIMEOUT_SECS");

        let config = loaded.unwrap();
        assert_eq!(config.github.token.as_deref(), Some("secret"));
        assert_eq!(config.github.timeout_secs, 7);
        assert_eq!(config.github.api_url, "https://api.github.com");
    }
}
