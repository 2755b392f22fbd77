use std::fmt;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gramwire_core::{Message, Update, User, WebhookInfo};

use crate::error::{Error, Result};
use crate::params::{
    AnswerCallbackQueryParams, DeleteMessageParams, DeleteWebhookParams, EditMessageTextParams,
    ForwardMessageParams, GetUpdatesParams, SendChatActionParams, SendMessageParams,
    SetWebhookParams,
};

/// Hosted Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Response envelope every Bot API method returns.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<i64>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T> {
        if self.ok {
            if let Some(result) = self.result {
                return Ok(result);
            }
        }
        Err(Error::Api {
            code: self.error_code.unwrap_or_default(),
            description: self
                .description
                .unwrap_or_else(|| "no description".to_string()),
            retry_after: self.parameters.and_then(|p| p.retry_after),
        })
    }
}

/// A Bot API client: one token, one HTTP connection pool.
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Clone)]
pub struct Bot {
    token: String,
    api_url: String,
    http: Client,
}

impl Bot {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Point the client at a self-hosted Bot API server.
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// POST one method call as JSON and decode the response envelope.
    ///
    /// The server reports method failures inside the envelope (often with a
    /// non-2xx status as well), so the envelope is decoded unconditionally
    /// and `ok: false` becomes [`Error::Api`].
    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "bot api call");
        let response = self
            .http
            .post(self.method_url(method))
            .json(params)
            .send()
            .await?;
        let envelope: ApiResponse<T> = response.json().await?;
        envelope.into_result()
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    pub async fn send_message(&self, params: &SendMessageParams) -> Result<Message> {
        self.call("sendMessage", params).await
    }

    pub async fn forward_message(&self, params: &ForwardMessageParams) -> Result<Message> {
        self.call("forwardMessage", params).await
    }

    pub async fn edit_message_text(&self, params: &EditMessageTextParams) -> Result<Message> {
        self.call("editMessageText", params).await
    }

    pub async fn delete_message(&self, params: &DeleteMessageParams) -> Result<bool> {
        self.call("deleteMessage", params).await
    }

    pub async fn send_chat_action(&self, params: &SendChatActionParams) -> Result<bool> {
        self.call("sendChatAction", params).await
    }

    pub async fn answer_callback_query(&self, params: &AnswerCallbackQueryParams) -> Result<bool> {
        self.call("answerCallbackQuery", params).await
    }

    /// Long-poll for updates. With a `timeout` in the params the request
    /// blocks server-side until something arrives or the timeout lapses.
    pub async fn get_updates(&self, params: &GetUpdatesParams) -> Result<Vec<Update>> {
        self.call("getUpdates", params).await
    }

    pub async fn set_webhook(&self, params: &SetWebhookParams) -> Result<bool> {
        self.call("setWebhook", params).await
    }

    pub async fn delete_webhook(&self, params: &DeleteWebhookParams) -> Result<bool> {
        self.call("deleteWebhook", params).await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call("getWebhookInfo", &serde_json::json!({})).await
    }
}

// The token grants full control of the bot; keep it out of debug output.
impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}
