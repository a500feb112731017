mod config;
mod errors;
mod interview;
mod models;
mod report;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::store::spawn_eviction_task;
use crate::interview::QuestionBank;
use crate::routes::{build_router, ENDPOINTS};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    let questions = match &config.questions_path {
        Some(path) => QuestionBank::from_file(path)?,
        None => QuestionBank::default(),
    };
    info!("Question bank loaded ({} questions)", questions.len());

    let state = AppState::new(config.clone(), questions);

    match config.session_ttl {
        Some(ttl) => {
            spawn_eviction_task(Arc::clone(&state.sessions), ttl, config.session_sweep_interval);
            info!("Idle sessions expire after {}s", ttl.as_secs());
        }
        None => info!("Session expiry disabled; sessions live until shutdown"),
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    for endpoint in ENDPOINTS {
        info!("  {endpoint}");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
