mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::session::SessionStore;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Parley API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = Arc::new(GroqClient::new(config.groq_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize session store and idle eviction sweeper
    let sessions = Arc::new(SessionStore::new());
    spawn_idle_sweeper(sessions.clone(), config.session_idle_minutes);

    // Build app state
    let state = AppState { sessions, llm };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Spawns the background task that evicts sessions idle past the configured
/// window. Sessions are otherwise retained for the process lifetime.
fn spawn_idle_sweeper(sessions: Arc<SessionStore>, idle_minutes: u64) {
    const SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(300);

    let max_idle = chrono::Duration::minutes(idle_minutes as i64);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            let evicted = sessions.evict_idle(max_idle).await;
            if evicted > 0 {
                let remaining = sessions.len().await;
                info!("Evicted {evicted} idle interview sessions ({remaining} remaining)");
            }
        }
    });
}
