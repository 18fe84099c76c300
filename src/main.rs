use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use ci_league::config::Config;
use ci_league::output::{LeaderboardReport, Reporter};
use ci_league::{start_of_week, GitHubClient, IntegrationsService};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./league.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository owner (user or organization)
    #[arg(long, env = "LEAGUE_OWNER")]
    owner: Option<String>,

    /// Repository to include, repeatable
    #[arg(short, long = "repo")]
    repos: Vec<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    format: String,

    /// Write the leaderboard to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Repositories fetched concurrently (overrides config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(owner) = cli.owner {
        config.team.owner = owner;
    }
    if !cli.repos.is_empty() {
        config.team.repos = cli.repos;
    }
    if let Some(jobs) = cli.jobs {
        config.fetch.max_concurrency = jobs;
    }

    let owner = config.team.owner.clone();
    let repos = config.team.repos.clone();
    if owner.is_empty() {
        bail!("No repository owner configured; pass --owner or set team.owner");
    }
    if repos.is_empty() {
        bail!("No repositories configured; pass --repo or set team.repos");
    }

    eprintln!(
        "{} {}",
        "CI League".bright_cyan().bold(),
        format!("{}/{{{}}}", owner, repos.join(",")).bright_white()
    );

    let client = GitHubClient::new(&config.github).context("Failed to build GitHub client")?;
    let service = IntegrationsService::new(Arc::new(client), config.team.alias_table())
        .with_max_concurrency(config.fetch.max_concurrency);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling fetch...");
                cancel.cancel();
            }
        });
    }

    let week_start = start_of_week();
    info!("Counting commits since {}", week_start);

    let leaderboard = service
        .get_integrations_since(&cancel, &owner, &repos, week_start.with_timezone(&Utc))
        .await
        .with_context(|| format!("Failed to build leaderboard for {}", owner))?;

    let report = LeaderboardReport::new(&owner, &repos, week_start, &leaderboard);
    Reporter::new(&cli.format, cli.output.as_deref()).generate_report(&report)?;

    Ok(())
}
