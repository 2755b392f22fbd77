//! Send one formatted message: convert HTML locally and attach the resulting
//! entities, instead of asking the server to parse markup.

use anyhow::Result;
use tracing::{info, Level};

use gramwire_api::{Bot, SendMessageParams};
use gramwire_html::{escape, html_to_entities};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let token = std::env::var("GRAMWIRE_BOT_TOKEN").expect("GRAMWIRE_BOT_TOKEN is not set");
    let chat_id: i64 = std::env::var("GRAMWIRE_CHAT_ID")
        .expect("GRAMWIRE_CHAT_ID is not set")
        .parse()
        .expect("GRAMWIRE_CHAT_ID must be a numeric chat id");

    let user_input = "x < y && y > z";
    let markup = format!(
        "<b>gramwire</b> demo: <i>italic</i>, <code>{}</code>, \
         <a href=\"https://example.com\">a link</a> and a \
         <tg-spoiler>spoiler</tg-spoiler>.",
        escape(user_input)
    );

    let (text, entities) = html_to_entities(&markup, true)?;
    for entity in &entities {
        info!(
            kind = ?entity.kind,
            offset = entity.offset,
            length = entity.length,
            "entity"
        );
    }

    let bot = Bot::new(&token);
    let params = SendMessageParams::new(chat_id, text).with_entities(entities);
    let message = bot.send_message(&params).await?;
    info!(message_id = message.message_id, "sent");

    Ok(())
}
