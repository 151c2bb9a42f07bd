// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! strava-year command line
//!
//! `auth` stores the initial Strava tokens, `sync` pulls new activities into
//! the local ledger and `summary` builds the yearly summary for the renderer.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use strava_year::{
    config::Config,
    error::{AppError, Result},
    models::BoundingBox,
    services::{
        aggregate::DEFAULT_KIND, Aggregator, CommandRenderer, DataScriptRenderer, Renderer,
        StravaClient, SyncEngine, YearOutcome,
    },
    store::{ActivityCache, TokenStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strava-year", version, about = "Strava activity ledger and yearly summary")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize with Strava and store the initial tokens
    Auth {
        /// Authorization code from the redirect URL (prompted for if omitted)
        #[arg(long)]
        code: Option<String>,
    },
    /// Fetch new activities into the local ledger
    Sync {
        /// Maximum number of activities to fetch
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate the yearly summary
    Summary {
        /// Year to generate summary for
        #[arg(long)]
        year: i32,
        /// Path to activities.json (defaults to STRAVA_ACTIVITIES_FILE)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Output directory
        #[arg(long, default_value = "plots/output")]
        output: PathBuf,
        /// Activity type to include
        #[arg(long, default_value = DEFAULT_KIND)]
        kind: String,
        /// Main map area as minLon,minLat,maxLon,maxLat
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<BoundingBox>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.json_logs);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            if e.needs_reauthorization() {
                eprintln!("Run `strava-year auth` to authorize with Strava.");
            }
            ExitCode::from(e.exit_status())
        }
    }
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Auth { code } => authorize(config, code).await,
        Commands::Sync { limit } => sync(config, limit).await,
        Commands::Summary {
            year,
            data,
            output,
            kind,
            bbox,
        } => summary(
            config,
            year,
            data.unwrap_or_else(|| config.activities_file.clone()),
            output,
            &kind,
            bbox.unwrap_or(config.bounding_box),
        ),
    }
}

fn strava_client(config: &Config) -> Result<StravaClient> {
    let (client_id, client_secret) = config.strava_client()?;
    StravaClient::new(client_id, client_secret)
}

async fn authorize(config: &Config, code: Option<String>) -> Result<()> {
    let client = strava_client(config)?;

    let code = match code {
        Some(code) => code,
        None => {
            println!(
                "\nPlease visit this URL to authorize the application:\n\n{}\n",
                client.authorization_url(&config.redirect_uri)
            );
            println!(
                "After authorizing you will be redirected to '{}?state=&code=...'.",
                config.redirect_uri
            );
            print!("Paste the 'code' parameter value here: ");
            std::io::stdout()
                .flush()
                .map_err(|e| AppError::Internal(e.into()))?;

            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| AppError::Internal(e.into()))?;
            line.trim().to_string()
        }
    };

    if code.is_empty() {
        return Err(AppError::AuthorizationFailed("no code entered".to_string()));
    }

    let credential = client.exchange_code(&code).await?;
    let store = TokenStore::new(&config.token_file);
    store.save(&credential)?;

    println!(
        "Authentication successful! Tokens saved to '{}'.",
        store.path().display()
    );
    Ok(())
}

async fn sync(config: &Config, limit: Option<usize>) -> Result<()> {
    let token_store = TokenStore::new(&config.token_file);
    // Fail on a missing credential before requiring client settings.
    token_store.load()?;

    let client = strava_client(config)?;
    let engine = SyncEngine::new(
        token_store,
        ActivityCache::new(&config.activities_file),
        client.clone(),
        client,
    );

    let report = engine.sync(limit).await?;
    if report.persisted {
        println!(
            "Fetched {} activities; ledger now holds {}.",
            report.fetched, report.total
        );
    } else {
        println!("No new activities ({} in ledger).", report.total);
    }
    Ok(())
}

fn summary(
    config: &Config,
    year: i32,
    data: PathBuf,
    output: PathBuf,
    kind: &str,
    bbox: BoundingBox,
) -> Result<()> {
    tracing::info!(path = %data.display(), "Loading data");
    let records = ActivityCache::new(&data).load_existing()?;

    let summary = match Aggregator::new(&records, kind, bbox).summarize(year) {
        YearOutcome::NoData { year } => {
            println!("No {} activities found for {}.", kind, year);
            return Ok(());
        }
        YearOutcome::Summary(summary) => summary,
    };

    let stats = &summary.payload.stats;
    println!("Found {} runs for year {}", stats.total_runs, year);
    println!(
        "Total {} | Longest {} | Average {} | {} per week | Pace {}",
        stats.total_distance,
        stats.max_distance,
        stats.avg_distance,
        stats.runs_per_week,
        stats.avg_pace
    );
    println!(
        "Runs in main map area: {}",
        summary.payload.main_area_runs.len()
    );

    let artifact = match &config.render_command {
        Some(program) => CommandRenderer::new(program.clone()).render(&summary.payload, &output)?,
        None => DataScriptRenderer.render(&summary.payload, &output)?,
    };
    println!("Saved summary to {}", artifact.display());
    Ok(())
}

/// Initialize logging to stderr, JSON lines or compact text.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strava_year=debug,info"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
