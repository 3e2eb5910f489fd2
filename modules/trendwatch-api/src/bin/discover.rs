//! One-shot discovery run from the command line. Prints the assembled view
//! as pretty JSON.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use gtrends_client::GtrendsClient;
use trendwatch_common::AppConfig;
use trendwatch_discovery::traits::{SystemClock, TokioSleeper};
use trendwatch_discovery::{DiscoveryConfig, DiscoveryOrchestrator, PgSnapshotStore};

#[derive(Parser)]
#[command(about = "Run keyword discovery for one scenario and print the result")]
struct Args {
    /// Scenario name (旅遊 / 健康 / 牙科 / 保健品)
    scenario: String,

    /// Trend source region code
    #[arg(long)]
    geo: Option<String>,

    /// How many top keywords to keep (1-5)
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Ignore the snapshot cache and refetch
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await?;
    let store = PgSnapshotStore::new(pool);
    store.ensure_schema().await?;

    let orchestrator = DiscoveryOrchestrator::new(
        Arc::new(GtrendsClient::new(&config.trends_hl, config.trends_tz)),
        Arc::new(store),
        Arc::new(TokioSleeper),
        Arc::new(SystemClock),
        DiscoveryConfig::default(),
    );

    let geo = args.geo.as_deref().unwrap_or(&config.default_geo);
    let view = orchestrator
        .discover(&args.scenario, geo, args.top_n.clamp(1, 5), args.force)
        .await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
