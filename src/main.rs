//! English Tutor Backend
//!
//! - Axum HTTP + WebSocket API
//! - Heuristic text assessment (pronunciation proxy, vocabulary, grammar)
//! - Optional OpenAI integration for conversation replies and grammar correction
//! - Grammar/vocabulary exercises and session achievements
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   OPENAI_API_KEY    : enables OpenAI integration if present
//!   OPENAI_BASE_URL   : default "https://api.openai.com/v1"
//!   OPENAI_MODEL      : default "gpt-4o-mini"
//!   AGENT_CONFIG_PATH : path to TOML config (prompts, tutor policy, practice content)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod assessment;
mod config;
mod domain;
mod error;
mod exercises;
mod logic;
mod openai;
mod progress;
mod protocol;
mod routes;
mod seeds;
mod session;
mod state;
mod telemetry;
mod tutor;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: assessor, tutor, sessions, practice content.
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "english_tutor", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "english_tutor", error = %e, "Failed to listen for shutdown signal");
    return;
  }
  info!(target: "english_tutor", "Shutdown signal received");
}
