//! diamond - MLB standings tables and team history charts in the terminal.
//!
//! Standings come from the public MLB stats API. Historical seasons are
//! cached locally so repeated charts don't refetch decades of data.

mod render;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use diamond_core::cache;
use diamond_core::models::{League, SeriesQuery, Statistic, Team};
use diamond_core::{ApiClient, Config, StandingsError, TimeSeriesBuilder};

#[derive(Parser)]
#[command(name = "diamond", version, about = "MLB standings and team history in the terminal")]
struct Cli {
    /// Stats API host
    #[arg(long, env = "DIAMOND_API_URL", global = true)]
    api_url: Option<String>,

    /// Directory holding the local cache
    #[arg(long, env = "DIAMOND_CACHE_DIR", global = true)]
    cache_dir: Option<PathBuf>,

    /// Days before cached seasons are refetched
    #[arg(long, global = true)]
    expiry_days: Option<u32>,

    /// Keep the cache in memory for this run only
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Division standings tables
    Standings {
        /// mlb, al or nl
        #[arg(long, default_value = "mlb")]
        league: League,

        /// Season to show; defaults to the current one
        #[arg(long, value_parser = clap::value_parser!(i32).range(SEASONS))]
        season: Option<i32>,
    },

    /// A team's history for one statistic
    Series {
        /// Team key (e.g. yankees) or numeric id
        #[arg(long)]
        team: Team,

        /// Statistic to chart (see `diamond stats`)
        #[arg(long, default_value = "wins")]
        stat: Statistic,

        /// First season
        #[arg(long, value_parser = clap::value_parser!(i32).range(SEASONS))]
        from: Option<i32>,

        /// Last season
        #[arg(long, value_parser = clap::value_parser!(i32).range(SEASONS))]
        to: Option<i32>,

        /// Season to leave out; repeatable
        #[arg(long = "exclude")]
        exclude: Vec<i32>,

        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known teams
    Teams,

    /// List chartable statistics
    Stats,

    /// Inspect or clear the local cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Write the effective configuration to the config file
    InitConfig,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove every cached entry
    Clear,

    /// Show how old the cached range is
    Status {
        #[arg(long, default_value = "mlb")]
        league: League,

        #[arg(long, value_parser = clap::value_parser!(i32).range(SEASONS))]
        from: Option<i32>,

        #[arg(long, value_parser = clap::value_parser!(i32).range(SEASONS))]
        to: Option<i32>,
    },
}

/// Seasons the stats API has standings for
const SEASONS: std::ops::RangeInclusive<i64> = 1876..=2100;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api_base_url = Some(url);
    }
    if let Some(dir) = cli.cache_dir.clone() {
        config.cache_dir = Some(dir);
    }
    if let Some(days) = cli.expiry_days {
        config.cache_expiry_days = Some(days);
    }
    config.validate()?;

    if let Err(e) = run(cli, config).await {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<StandingsError>() {
        Some(err) if err.is_retryable() => {
            eprintln!("Error: {}", err);
            eprintln!("The standings service may be temporarily unavailable. Try again.");
        }
        Some(StandingsError::TeamNotFound { team_id }) => {
            eprintln!("Team not found: no team with id {} in the current standings.", team_id);
        }
        _ => eprintln!("Error: {:#}", e),
    }
}

fn build_builder(no_cache: bool, config: &Config) -> Result<TimeSeriesBuilder<ApiClient>> {
    let client = ApiClient::with_base_url(config.api_base_url())
        .context("Failed to create API client")?;
    let stats_cache = if no_cache {
        cache::in_memory()
    } else {
        let dir = config.cache_dir()?;
        info!(cache_dir = %dir.display(), "Opening cache");
        cache::open(&dir)
            .with_context(|| format!("Failed to open cache at {}", dir.display()))?
    };
    Ok(TimeSeriesBuilder::new(client, stats_cache).with_expiry_days(config.expiry_days()))
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let no_cache = cli.no_cache;
    match cli.command {
        Command::Teams => {
            render::teams();
            Ok(())
        }
        Command::Stats => {
            render::statistics();
            Ok(())
        }
        Command::InitConfig => {
            config.save().context("Failed to save configuration")?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Standings { league, season } => {
            let builder = build_builder(no_cache, &config)?;
            let snapshot = builder.season_standings(league, season).await?;
            render::standings(league, season, &snapshot);
            Ok(())
        }
        Command::Series {
            team,
            stat,
            from,
            to,
            exclude,
            json,
        } => {
            let builder = build_builder(no_cache, &config)?;
            let (default_start, default_end) = config.year_range();
            let mut exclude_years = config.exclude_years.clone();
            exclude_years.extend(exclude);

            let current = builder.current_record(team.id).await?;
            let query = SeriesQuery {
                team,
                statistic: stat,
                start_year: from.unwrap_or(default_start),
                end_year: to.unwrap_or(default_end),
                exclude_years,
            };
            info!(team = team.key, stat = %stat, start = query.start_year, end = query.end_year, "Building chart");
            let chart = builder.chart(&query).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                render::chart(&current, &chart);
            }
            Ok(())
        }
        Command::Cache { action } => {
            let builder = build_builder(no_cache, &config)?;
            match action {
                CacheAction::Clear => {
                    builder.cache().clear();
                    println!("Cache cleared.");
                }
                CacheAction::Status { league, from, to } => {
                    let (default_start, default_end) = config.year_range();
                    let start = from.unwrap_or(default_start);
                    let end = to.unwrap_or(default_end);
                    let age = builder
                        .range_age(league, start, end)
                        .unwrap_or_else(|| "never".to_string());
                    println!("{} {}-{}: cached {}", league, start, end, age);
                }
            }
            Ok(())
        }
    }
}
