//! Dashboard server
//!
//! Main binary for running the dashboard in production or development.
//!
//! # Environment Variables
//!
//! - `DASHBOARD_CONFIG`: Path of the TOML configuration file (default: `dashboard.toml` if present)
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RUST_LOG`: Log level (default: info)
//! - `LOG_FORMAT`: `json` for JSON log lines (default: human-readable)

use std::{env, fs, sync::Arc};

use anyhow::Context;
use dashboard_api::{
    ApiServer, AppState, DashboardConfig, IssuesTopic, RenderContext, Topic, SITE_TITLE,
};
use dashboard_storage::{InMemoryStore, ReadThroughCache};
use issues_topic::IssuesResolver;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = DashboardConfig::from_env().context("Failed to load configuration")?;

    let store = Arc::new(match &config.seed_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {:?}", path))?;
            InMemoryStore::from_seed_json(&json)
                .with_context(|| format!("Failed to load seed file {:?}", path))?
        }
        None => InMemoryStore::new(),
    });
    let cache = Arc::new(ReadThroughCache::new(store.clone(), config.cache.ttl()));

    let resolver = IssuesResolver::new(cache, store, config.issues.resolver.clone());
    let render = RenderContext::new(SITE_TITLE)?;
    let issues: Arc<dyn Topic> = Arc::new(IssuesTopic::new(
        resolver,
        render.clone(),
        config.issues.clone(),
    )?);

    tracing::info!("Starting dashboard");
    tracing::info!("Issues repository: {}", config.issues.resolver.repository);
    tracing::info!(
        scan = ?config.issues.resolver.scan,
        projection = ?config.issues.resolver.projection,
        cache_ttl_secs = config.cache.ttl_secs,
        "Issues topic configured"
    );

    let state = AppState::new(render, vec![issues]);
    let server = ApiServer::new(config.server, state);

    // Start server with graceful shutdown
    server.serve().await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
