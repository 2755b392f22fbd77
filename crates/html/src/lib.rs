//! HTML → message-entity conversion.
//!
//! The remote API accepts message text either with server-side parsing
//! (`parse_mode`) or as plain text plus an explicit list of formatting
//! entities. This crate does the conversion locally: it takes a constrained
//! HTML-like subset and produces the plain text and entity list to attach to
//! an outgoing message, with offsets counted in UTF-16 code units the way the
//! API expects.
//!
//! ```
//! use gramwire_html::html_to_entities;
//!
//! let (text, entities) = html_to_entities("<b>bold</b> plain", false).unwrap();
//! assert_eq!(text, "bold plain");
//! assert_eq!(entities.len(), 1);
//! ```

mod classify;
mod error;
mod scan;

pub use error::HtmlError;

use gramwire_core::MessageEntity;

use crate::scan::{Scanner, Tag, Token};

/// One in-progress annotation: a prototype entity plus the tag name that
/// opened it, kept for matching the close tag.
struct OpenTag {
    tag: String,
    entity: MessageEntity,
}

/// UTF-16 code-unit length of a string, the unit the API counts offsets in.
fn utf16_len(s: &str) -> i32 {
    s.encode_utf16().count() as i32
}

/// Convert an HTML-like markup string into plain text plus entities.
///
/// Single forward pass over the token stream. Recognized tags push an open
/// entity at the current UTF-16 offset; their matching close tags pop it,
/// compute the span length, and append it to the output, so the output order
/// is close-tag order (an inner span closed early precedes the outer span
/// that contains it). Zero-length spans are discarded. Tags still open at end
/// of input are dropped silently in both modes.
///
/// With `strict` set, an end tag that matches no open tag — stack empty or a
/// different tag on top — fails with [`HtmlError::UnexpectedEndTag`]. Without
/// it, such end tags are ignored and the open stack is left as it was.
/// Unrecognized tags are ignored in both modes. A lexical failure is always
/// fatal as [`HtmlError::MalformedMarkup`].
pub fn html_to_entities(
    html: &str,
    strict: bool,
) -> Result<(String, Vec<MessageEntity>), HtmlError> {
    let mut scanner = Scanner::new(html);
    let mut open: Vec<OpenTag> = Vec::new();
    let mut entities: Vec<MessageEntity> = Vec::new();
    let mut text = String::with_capacity(html.len());
    let mut len16: i32 = 0;

    loop {
        match scanner.next_token()? {
            Token::Eof => break,
            Token::Text(chunk) => {
                len16 += utf16_len(&chunk);
                text.push_str(&chunk);
            }
            Token::Open(tag) => {
                if let Some(mut entity) = classify::classify(&tag) {
                    entity.offset = len16;
                    open.push(OpenTag {
                        tag: tag.name,
                        entity,
                    });
                }
            }
            Token::Close(name) => {
                if classify::classify(&Tag::named(name.as_str())).is_none() {
                    continue;
                }
                let matched = open.last().is_some_and(|top| top.tag == name);
                if !matched {
                    if strict {
                        return Err(HtmlError::UnexpectedEndTag(name));
                    }
                    // Lenient: drop the end-tag occurrence, keep the stack.
                    continue;
                }
                if let Some(top) = open.pop() {
                    let mut entity = top.entity;
                    entity.length = len16 - entity.offset;
                    if entity.length > 0 {
                        entities.push(entity);
                    }
                }
            }
        }
    }

    Ok((text, entities))
}

/// Escape text for safe interpolation into the markup dialect
/// [`html_to_entities`] accepts.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramwire_core::EntityKind;

    fn entity(kind: EntityKind, offset: i32, length: i32) -> MessageEntity {
        MessageEntity::new(kind, offset, length)
    }

    #[test]
    fn test_plain_text_passes_through() {
        let (text, entities) = html_to_entities("no markup here", true).unwrap();
        assert_eq!(text, "no markup here");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_bold_span() {
        let (text, entities) = html_to_entities("<b>bold text</b>", true).unwrap();
        assert_eq!(text, "bold text");
        assert_eq!(entities, vec![entity(EntityKind::Bold, 0, 9)]);
    }

    #[test]
    fn test_sibling_spans_emit_in_document_order() {
        let (text, entities) = html_to_entities(
            "This is <strong>strong</strong> and <em>italic</em> text.",
            true,
        )
        .unwrap();
        assert_eq!(text, "This is strong and italic text.");
        assert_eq!(
            entities,
            vec![
                entity(EntityKind::Bold, 8, 6),
                entity(EntityKind::Italic, 19, 6),
            ]
        );
    }

    #[test]
    fn test_nested_spans_emit_in_close_order() {
        let (text, entities) = html_to_entities("<b>out <i>in</i></b>", true).unwrap();
        assert_eq!(text, "out in");
        // The inner span closes first and is appended first; output is never
        // re-sorted by offset.
        assert_eq!(
            entities,
            vec![
                entity(EntityKind::Italic, 4, 2),
                entity(EntityKind::Bold, 0, 6),
            ]
        );
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        let (text, entities) =
            html_to_entities("\u{1F449} <a href=\"https://example.com\">more</a>", true).unwrap();
        assert_eq!(text, "\u{1F449} more");
        // The pointing emoji is a surrogate pair: 2 units, plus the space.
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::TextLink);
        assert_eq!(entities[0].offset, 3);
        assert_eq!(entities[0].length, 4);
        assert_eq!(entities[0].url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_zero_length_span_suppressed() {
        let (text, entities) = html_to_entities("<b></b>", false).unwrap();
        assert_eq!(text, "");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_unknown_tags_ignored_in_both_modes() {
        for strict in [false, true] {
            let (text, entities) = html_to_entities("<div>text</div>", strict).unwrap();
            assert_eq!(text, "text");
            assert!(entities.is_empty());
        }
    }

    #[test]
    fn test_text_mention_from_pseudo_url() {
        let (text, entities) =
            html_to_entities(r#"<a href="tg://user?id=12345">Bob</a>"#, true).unwrap();
        assert_eq!(text, "Bob");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::TextMention);
        assert_eq!(entities[0].user_id, Some(12345));
        assert_eq!(entities[0].offset, 0);
        assert_eq!(entities[0].length, 3);
    }

    #[test]
    fn test_pre_keeps_language_attribute() {
        let (text, entities) =
            html_to_entities(r#"<pre language="rust">fn main() {}</pre>"#, true).unwrap();
        assert_eq!(text, "fn main() {}");
        assert_eq!(entities[0].kind, EntityKind::Pre);
        assert_eq!(entities[0].language.as_deref(), Some("rust"));
        assert_eq!(entities[0].length, 12);
    }

    #[test]
    fn test_spoiler_element() {
        let (text, entities) = html_to_entities("<tg-spoiler>hidden</tg-spoiler>", true).unwrap();
        assert_eq!(text, "hidden");
        assert_eq!(entities, vec![entity(EntityKind::Spoiler, 0, 6)]);
    }

    #[test]
    fn test_span_spoiler_left_open_is_dropped() {
        // </span> carries no class attribute, so it never classifies; the
        // open spoiler dangles and is discarded at end of input.
        let (text, entities) =
            html_to_entities(r#"<span class="tg-spoiler">x</span>"#, false).unwrap();
        assert_eq!(text, "x");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_mismatched_close_fails_strict() {
        let err = html_to_entities("<b><i>x</b></i>", true).unwrap_err();
        match err {
            HtmlError::UnexpectedEndTag(name) => assert_eq!(name, "b"),
            other => panic!("expected UnexpectedEndTag, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_close_tolerated_lenient() {
        // </b> is dropped (the open <i> stays on the stack), </i> then
        // matches; the never-closed <b> is discarded at end of input.
        let (text, entities) = html_to_entities("<b><i>x</b></i>", false).unwrap();
        assert_eq!(text, "x");
        assert_eq!(entities, vec![entity(EntityKind::Italic, 0, 1)]);
    }

    #[test]
    fn test_mismatched_close_keeps_stack_entry_alive() {
        // The ignored </i> leaves <b> open, so the later </b> still closes it
        // over the full remaining span.
        let (text, entities) = html_to_entities("<b>a</i>b</b>", false).unwrap();
        assert_eq!(text, "ab");
        assert_eq!(entities, vec![entity(EntityKind::Bold, 0, 2)]);
    }

    #[test]
    fn test_close_without_open() {
        let err = html_to_entities("x</b>", true).unwrap_err();
        assert!(matches!(err, HtmlError::UnexpectedEndTag(name) if name == "b"));

        let (text, entities) = html_to_entities("x</b>", false).unwrap();
        assert_eq!(text, "x");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_unclosed_tag_dropped_at_end_of_input() {
        for strict in [false, true] {
            let (text, entities) = html_to_entities("<b>bold", strict).unwrap();
            assert_eq!(text, "bold");
            assert!(entities.is_empty());
        }
    }

    #[test]
    fn test_character_references_feed_plain_text() {
        let (text, entities) = html_to_entities("<code>1 &lt; 2 &amp;&amp; ok</code>", true).unwrap();
        assert_eq!(text, "1 < 2 && ok");
        assert_eq!(entities, vec![entity(EntityKind::Code, 0, 11)]);
    }

    #[test]
    fn test_unknown_character_reference_is_malformed() {
        let err = html_to_entities("&nope;", false).unwrap_err();
        assert!(matches!(err, HtmlError::MalformedMarkup(_)));
    }

    #[test]
    fn test_escape_round_trips_through_converter() {
        let raw = "a < b && c > d";
        let markup = format!("<b>{}</b>", escape(raw));
        let (text, entities) = html_to_entities(&markup, true).unwrap();
        assert_eq!(text, raw);
        assert_eq!(entities, vec![entity(EntityKind::Bold, 0, 14)]);
    }
}
