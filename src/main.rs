use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flow_stage_api::backend::SupabaseClient;
use flow_stage_api::config;
use flow_stage_api::database::{DatabaseManager, PgStore};
use flow_stage_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "flow-stage-api")]
#[command(about = "Flow Stage booking marketplace API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Address to bind (overrides FLOW_STAGE_HOST)")]
    host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides FLOW_STAGE_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SUPABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting Flow Stage API in {:?} mode", config.environment);
    if config.auth.jwt_secret.is_empty() {
        tracing::warn!("SUPABASE_JWT_SECRET is not set; every protected request will be rejected");
    }

    let pool = DatabaseManager::connect_lazy(&config.database).context("failed to configure database pool")?;
    let supabase = Arc::new(SupabaseClient::new(&config.backend).context("failed to configure backend client")?);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, Arc::new(PgStore::new(pool.clone())), supabase.clone(), supabase);
    let app = flow_stage_api::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Flow Stage API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
