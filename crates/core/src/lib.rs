pub mod markup;
pub mod message;
pub mod traits;
pub mod types;
pub mod update;

pub use markup::{
    ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
    ReplyKeyboardRemove, ReplyMarkup,
};
pub use message::{EntityKind, Message, MessageEntity};
pub use traits::UpdateSource;
pub use types::{Chat, ChatAction, ChatId, ChatKind, ParseMode, User, WebhookInfo};
pub use update::{CallbackQuery, Update};
