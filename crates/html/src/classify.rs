use gramwire_core::{EntityKind, MessageEntity};

use crate::scan::Tag;

/// Pseudo-URL scheme prefix marking an inline user mention.
const USER_MENTION_PREFIX: &str = "tg://user?id=";

/// Map a tag to the entity it opens, or `None` for unrecognized tags.
///
/// Unrecognized tags never produce an entity and never fail, in either
/// strictness mode. Offset and length on the returned prototype are filled in
/// by the range tracker once the span is known.
pub fn classify(tag: &Tag) -> Option<MessageEntity> {
    let entity = match tag.name.as_str() {
        "b" | "strong" => MessageEntity::new(EntityKind::Bold, 0, 0),
        "i" | "em" => MessageEntity::new(EntityKind::Italic, 0, 0),
        "u" | "ins" => MessageEntity::new(EntityKind::Underline, 0, 0),
        "s" | "strike" | "del" => MessageEntity::new(EntityKind::Strikethrough, 0, 0),
        "code" => MessageEntity::new(EntityKind::Code, 0, 0),
        "pre" => {
            let mut entity = MessageEntity::new(EntityKind::Pre, 0, 0);
            entity.language = tag.language.clone();
            entity
        }
        "tg-spoiler" => MessageEntity::new(EntityKind::Spoiler, 0, 0),
        "span" if tag.class.as_deref() == Some("tg-spoiler") => {
            MessageEntity::new(EntityKind::Spoiler, 0, 0)
        }
        "a" => {
            let href = tag.href.clone().unwrap_or_default();
            match href
                .strip_prefix(USER_MENTION_PREFIX)
                .and_then(|id| id.parse::<i64>().ok())
            {
                Some(user_id) => {
                    let mut entity = MessageEntity::new(EntityKind::TextMention, 0, 0);
                    entity.user_id = Some(user_id);
                    entity
                }
                None => {
                    let mut entity = MessageEntity::new(EntityKind::TextLink, 0, 0);
                    entity.url = Some(href);
                    entity
                }
            }
        }
        _ => return None,
    };
    Some(entity)
}
