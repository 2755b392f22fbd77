use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Telegram user or bot account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl User {
    /// Display name: "first last" when a last name is set, else the first name.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// A chat the bot participates in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// The four chat flavors the API distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat addressing: numeric id or `@channelusername`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        ChatId::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        ChatId::Username(username)
    }
}

/// Server-side text formatting modes.
///
/// Callers that convert markup locally (gramwire-html) attach entities
/// instead and send no parse mode at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    MarkdownV2,
}

/// Chat action shown to users while the bot prepares a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

/// Current webhook status, as returned by getWebhookInfo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookInfo {
    pub url: String,
    pub has_custom_certificate: bool,
    pub pending_update_count: i64,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_error_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&ChatId::Id(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&ChatId::from("@rustlang")).unwrap(),
            "\"@rustlang\""
        );
    }

    #[test]
    fn test_chat_deserializes_wire_type_field() {
        let chat: Chat =
            serde_json::from_str(r#"{"id":-100123,"type":"supergroup","title":"rustaceans"}"#)
                .unwrap();
        assert_eq!(chat.id, -100123);
        assert_eq!(chat.kind, ChatKind::Supergroup);
        assert_eq!(chat.title.as_deref(), Some("rustaceans"));
    }

    #[test]
    fn test_parse_mode_wire_names() {
        assert_eq!(serde_json::to_string(&ParseMode::Html).unwrap(), "\"HTML\"");
        assert_eq!(
            serde_json::to_string(&ParseMode::MarkdownV2).unwrap(),
            "\"MarkdownV2\""
        );
    }

    #[test]
    fn test_user_full_name() {
        let user = User {
            id: 1,
            is_bot: false,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            username: None,
            language_code: None,
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
    }
}
