//! Webhook-driven echo bot: registers the webhook with the API, then serves
//! the update endpoint and echoes text messages.
//!
//! Required env vars:
//!   GRAMWIRE_BOT_TOKEN      — bot token
//!   GRAMWIRE_WEBHOOK_URL    — public HTTPS URL routed to this process
//!   GRAMWIRE_WEBHOOK_SECRET — optional shared secret for request checks

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, Level};

use gramwire_api::{Bot, SendMessageParams, SetWebhookParams};
use gramwire_core::UpdateSource;
use gramwire_webhook::{WebhookConfig, WebhookServer};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let token = std::env::var("GRAMWIRE_BOT_TOKEN").expect("GRAMWIRE_BOT_TOKEN is not set");
    let public_url =
        std::env::var("GRAMWIRE_WEBHOOK_URL").expect("GRAMWIRE_WEBHOOK_URL is not set");
    let secret = std::env::var("GRAMWIRE_WEBHOOK_SECRET").ok();

    let bot = Bot::new(&token);

    let mut params = SetWebhookParams::new(&public_url);
    params.secret_token = secret.clone();
    bot.set_webhook(&params).await?;
    info!(url = %public_url, "webhook registered");

    let server = WebhookServer::new(WebhookConfig {
        secret_token: secret,
        ..WebhookConfig::default()
    });

    let (tx, mut rx) = mpsc::channel(256);
    tokio::spawn(async move {
        if let Err(e) = server.start(tx).await {
            error!("webhook server stopped: {}", e);
        }
    });

    while let Some(update) = rx.recv().await {
        let Some(message) = update.message else {
            continue;
        };
        let Some(text) = message.text else {
            continue;
        };
        bot.send_message(&SendMessageParams::new(message.chat.id, text))
            .await?;
    }

    Ok(())
}
