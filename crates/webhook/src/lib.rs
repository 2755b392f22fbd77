//! Webhook update source.
//!
//! Runs an HTTP endpoint the remote service POSTs updates to, as the
//! alternative to long polling. TLS termination is expected in front of this
//! listener (reverse proxy or load balancer); authenticity is checked via the
//! shared secret configured with setWebhook, which the service echoes in a
//! request header.

use std::net::SocketAddr;

use anyhow::Result;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use gramwire_core::{Update, UpdateSource};

/// Header the remote service echoes the configured webhook secret in.
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub bind_addr: SocketAddr,
    /// Route the updates are POSTed to.
    pub path: String,
    /// Must match the `secret_token` passed to setWebhook. Unset skips the
    /// check entirely.
    pub secret_token: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8443)),
            path: "/webhook".to_string(),
            secret_token: None,
        }
    }
}

#[derive(Clone)]
struct AppState {
    tx: mpsc::Sender<Update>,
    secret_token: Option<String>,
}

/// Webhook [`UpdateSource`]: binds a listener and forwards decoded updates.
pub struct WebhookServer {
    config: WebhookConfig,
}

impl WebhookServer {
    pub fn new(config: WebhookConfig) -> Self {
        Self { config }
    }

    /// Build the update route as a standalone router, for callers that mount
    /// it into a larger app instead of running [`serve`](Self::serve).
    pub fn build_router(&self, tx: mpsc::Sender<Update>) -> Router {
        let state = AppState {
            tx,
            secret_token: self.config.secret_token.clone(),
        };
        Router::new()
            .route(&self.config.path, post(receive_update))
            .with_state(state)
    }

    /// Bind and serve until the process ends.
    pub async fn serve(&self, tx: mpsc::Sender<Update>) -> Result<()> {
        let app = self.build_router(tx);
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(addr = %self.config.bind_addr, path = %self.config.path, "webhook listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> StatusCode {
    let presented = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if !secret_matches(state.secret_token.as_deref(), presented) {
        warn!("webhook secret mismatch, rejecting update");
        return StatusCode::FORBIDDEN;
    }

    // Always 200 once accepted: a non-2xx status makes the service re-deliver
    // the same update, which is wrong when our receiver is simply gone.
    if state.tx.send(update).await.is_err() {
        warn!("update receiver closed, dropping webhook update");
    }
    StatusCode::OK
}

/// Configured secret against the presented header value. No configured
/// secret accepts everything.
fn secret_matches(expected: Option<&str>, presented: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => presented == Some(expected),
    }
}

#[async_trait]
impl UpdateSource for WebhookServer {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn start(&self, tx: mpsc::Sender<Update>) -> Result<()> {
        self.serve(tx).await
    }
}
