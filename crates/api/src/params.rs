//! Typed request parameters, one struct per Bot API method.
//!
//! Required fields go through `new`; everything optional is a public `Option`
//! field skipped during serialization when unset, so the wire body carries
//! only what the caller filled in.

use serde::Serialize;

use gramwire_core::{ChatAction, ChatId, MessageEntity, ParseMode, ReplyMarkup};

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams {
    pub chat_id: ChatId,
    pub text: String,
    /// Server-side parsing. Leave unset when attaching `entities`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessageParams {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            entities: None,
            disable_notification: None,
            protect_content: None,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    /// Attach pre-computed formatting entities (see gramwire-html).
    pub fn with_entities(mut self, entities: Vec<MessageEntity>) -> Self {
        self.entities = Some(entities);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessageParams {
    pub chat_id: ChatId,
    pub from_chat_id: ChatId,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
}

impl ForwardMessageParams {
    pub fn new(
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            disable_notification: None,
            protect_content: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EditMessageTextParams {
    pub chat_id: ChatId,
    pub message_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl EditMessageTextParams {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_id,
            text: text.into(),
            parse_mode: None,
            entities: None,
            reply_markup: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessageParams {
    pub chat_id: ChatId,
    pub message_id: i64,
}

impl DeleteMessageParams {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i64) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendChatActionParams {
    pub chat_id: ChatId,
    pub action: ChatAction,
}

impl SendChatActionParams {
    pub fn new(chat_id: impl Into<ChatId>, action: ChatAction) -> Self {
        Self {
            chat_id: chat_id.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQueryParams {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alert: Option<bool>,
}

impl AnswerCallbackQueryParams {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpdatesParams {
    /// Identifier of the first update to return; updates below it are
    /// confirmed and discarded server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Long-poll timeout in seconds; 0 or unset means short polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetWebhookParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
    /// Shared secret echoed back in `X-Telegram-Bot-Api-Secret-Token`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
}

impl SetWebhookParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
            allowed_updates: None,
            drop_pending_updates: None,
            secret_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteWebhookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramwire_core::EntityKind;

    #[test]
    fn test_send_message_minimal_body() {
        let params = SendMessageParams::new(7, "hi");
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"chat_id":7,"text":"hi"}"#
        );
    }

    #[test]
    fn test_send_message_with_entities() {
        let entity = MessageEntity::new(EntityKind::Bold, 0, 2);
        let params = SendMessageParams::new("@channel", "hi").with_entities(vec![entity]);
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"chat_id":"@channel","text":"hi","entities":[{"type":"bold","offset":0,"length":2}]}"#
        );
    }

    #[test]
    fn test_get_updates_default_is_empty_body() {
        assert_eq!(
            serde_json::to_string(&GetUpdatesParams::default()).unwrap(),
            "{}"
        );
    }
}
