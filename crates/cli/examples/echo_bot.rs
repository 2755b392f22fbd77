//! Long-poll echo bot: repeats every text message back to its chat.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, Level};

use gramwire_api::{Bot, SendMessageParams};
use gramwire_core::UpdateSource;
use gramwire_poller::UpdatePoller;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let token = std::env::var("GRAMWIRE_BOT_TOKEN").expect("GRAMWIRE_BOT_TOKEN is not set");
    let bot = Bot::new(&token);

    let me = bot.get_me().await?;
    info!("running as @{}", me.username.as_deref().unwrap_or("?"));

    let (tx, mut rx) = mpsc::channel(256);
    let poller = UpdatePoller::new(bot.clone());
    tokio::spawn(async move {
        if let Err(e) = poller.start(tx).await {
            error!("poller stopped: {}", e);
        }
    });

    while let Some(update) = rx.recv().await {
        let Some(message) = update.message else {
            continue;
        };
        let Some(text) = message.text else {
            continue;
        };
        info!(chat_id = message.chat.id, "echoing message");
        bot.send_message(&SendMessageParams::new(message.chat.id, text))
            .await?;
    }

    Ok(())
}
