//! Bot API client: one request-builder method per remote method, a shared
//! response-envelope decoder, and typed parameter structs.

pub mod bot;
pub mod error;
pub mod params;

pub use bot::{Bot, DEFAULT_API_URL};
pub use error::{Error, Result};
pub use params::{
    AnswerCallbackQueryParams, DeleteMessageParams, DeleteWebhookParams, EditMessageTextParams,
    ForwardMessageParams, GetUpdatesParams, SendChatActionParams, SendMessageParams,
    SetWebhookParams,
};
