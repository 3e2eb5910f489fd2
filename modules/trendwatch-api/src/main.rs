use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gtrends_client::GtrendsClient;
use trendwatch_common::AppConfig;
use trendwatch_discovery::traits::{SystemClock, TokioSleeper};
use trendwatch_discovery::{DiscoveryConfig, DiscoveryOrchestrator, PgSnapshotStore};

mod news;
mod rest;

use news::NewsFetcher;

pub struct AppState {
    pub orchestrator: DiscoveryOrchestrator,
    pub news: NewsFetcher,
    pub default_geo: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("trendwatch=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = PgSnapshotStore::new(pool);
    store.ensure_schema().await?;

    let source = Arc::new(GtrendsClient::new(&config.trends_hl, config.trends_tz));
    let orchestrator = DiscoveryOrchestrator::new(
        source,
        Arc::new(store),
        Arc::new(TokioSleeper),
        Arc::new(SystemClock),
        DiscoveryConfig::default(),
    );

    let state = Arc::new(AppState {
        orchestrator,
        news: NewsFetcher::new(config.gnews_api_key.clone()),
        default_geo: config.default_geo.clone(),
    });

    let app = Router::new()
        .route("/health", get(rest::health))
        .route("/api/scenarios", get(rest::api_scenarios))
        .route("/api/keyword-discovery", get(rest::api_keyword_discovery))
        .route("/api/keyword-news", get(rest::api_keyword_news))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Trendwatch API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
