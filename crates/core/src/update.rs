use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::types::User;

/// An incoming update from the remote API, delivered either by long polling
/// or by webhook. At most one of the payload fields is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// The message payload, if this update carries one in any flavor.
    pub fn any_message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
    }
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserializes_with_only_id() {
        let update: Update = serde_json::from_str(r#"{"update_id": 1}"#).unwrap();
        assert_eq!(update.update_id, 1);
        assert!(update.any_message().is_none());
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn test_any_message_prefers_new_messages() {
        let json = r#"{
            "update_id": 2,
            "message": {
                "message_id": 10,
                "chat": {"id": 5, "type": "private"},
                "date": 1700000000,
                "text": "hi"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(
            update.any_message().and_then(|m| m.text.as_deref()),
            Some("hi")
        );
    }
}
