use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Chat, User};

/// A message in a chat.
///
/// Only the fields the library acts on are modeled; unknown wire fields are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<DateTime<Utc>>,
}

/// A formatting annotation over a span of message text.
///
/// `offset` and `length` are measured in UTF-16 code units from the start of
/// the text, the unit the remote API counts in. A character outside the BMP
/// (most emoji) occupies two units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub offset: i32,
    pub length: i32,
    /// Target URL, for `text_link` entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Mentioned user id, for `text_mention` entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Programming language, for `pre` entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: EntityKind, offset: i32, length: i32) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
            user_id: None,
            language: None,
        }
    }
}

/// Entity kinds the API delivers or accepts.
///
/// gramwire-html only ever produces the nine formatting kinds from `Bold`
/// through `TextMention`; the rest appear on incoming messages where the
/// server tags things like @mentions and URLs itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Blockquote,
    CustomEmoji,
}
