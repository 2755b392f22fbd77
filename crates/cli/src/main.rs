mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;

use gramwire_api::{Bot, SendMessageParams};
use gramwire_core::UpdateSource;
use gramwire_html::html_to_entities;
use gramwire_poller::UpdatePoller;

use config::Config;

#[derive(Parser)]
#[command(name = "gramwire")]
#[command(about = "Telegram Bot API client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bot account behind the configured token
    GetMe,
    /// Send a text message to a chat
    Send {
        /// Numeric chat id or @channelusername
        chat_id: String,
        /// Message text, or HTML markup with --html
        text: String,
        /// Convert the text from HTML and attach entities
        #[arg(long)]
        html: bool,
    },
    /// Long-poll for updates and print them as JSON lines
    Listen,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    let bot = match &config.api_url {
        Some(url) => Bot::with_api_url(&config.token, url),
        None => Bot::new(&config.token),
    };

    match cli.command {
        Commands::GetMe => {
            let me = bot.get_me().await?;
            println!("{}", serde_json::to_string_pretty(&me)?);
        }
        Commands::Send {
            chat_id,
            text,
            html,
        } => {
            let chat_id = parse_chat_id(&chat_id);
            let params = if html {
                // Strict conversion: bad markup should fail the send, not
                // silently produce a differently-formatted message.
                let (text, entities) = html_to_entities(&text, true)?;
                SendMessageParams::new(chat_id, text).with_entities(entities)
            } else {
                SendMessageParams::new(chat_id, text)
            };
            let message = bot.send_message(&params).await?;
            info!(message_id = message.message_id, "message sent");
        }
        Commands::Listen => {
            let (tx, mut rx) = mpsc::channel(256);
            let poller = UpdatePoller::new(bot);
            tokio::spawn(async move {
                if let Err(e) = poller.start(tx).await {
                    tracing::error!("poller stopped: {}", e);
                }
            });
            while let Some(update) = rx.recv().await {
                println!("{}", serde_json::to_string(&update)?);
            }
        }
    }

    Ok(())
}

/// Numeric ids become integer chat ids; anything else is a username.
fn parse_chat_id(raw: &str) -> gramwire_core::ChatId {
    match raw.parse::<i64>() {
        Ok(id) => gramwire_core::ChatId::Id(id),
        Err(_) => gramwire_core::ChatId::Username(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramwire_core::ChatId;

    #[test]
    fn test_parse_chat_id_numeric_and_username() {
        assert_eq!(parse_chat_id("-100123"), ChatId::Id(-100123));
        assert_eq!(
            parse_chat_id("@rustlang"),
            ChatId::Username("@rustlang".to_string())
        );
    }
}
