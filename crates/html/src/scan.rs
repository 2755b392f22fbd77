use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::HtmlError;

/// A lexical token from the markup scanner.
#[derive(Debug)]
pub enum Token {
    /// A run of character data, entity references resolved.
    Text(String),
    /// A start tag with the attributes classification reads.
    Open(Tag),
    /// An end tag.
    Close(String),
    /// End of input.
    Eof,
}

/// A tag reduced to its name and recognized attributes.
///
/// The generic attribute list is flattened to typed fields here, once per
/// tag; the first occurrence of an attribute wins. End tags carry no
/// attributes and classify on name alone.
#[derive(Debug, Default)]
pub struct Tag {
    /// Tag name, ASCII-lowercased as scanned.
    pub name: String,
    pub href: Option<String>,
    pub class: Option<String>,
    pub language: Option<String>,
}

impl Tag {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Streaming tokenizer over the HTML-like input.
///
/// Wraps a lenient `quick_xml::Reader`: end-tag names are not matched against
/// open tags, so unbalanced markup still tokenizes. The stream is finite and
/// consumed exactly once; nesting bookkeeping belongs to the caller.
pub struct Scanner<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut reader = Reader::from_str(input);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        Self { reader }
    }

    /// Pull the next token. Comments, declarations, processing instructions,
    /// doctypes, and self-closing tags contribute nothing and are skipped;
    /// CDATA counts as text.
    pub fn next_token(&mut self) -> Result<Token, HtmlError> {
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => {
                    return Ok(Token::Text(
                        t.unescape().map_err(quick_xml::Error::from)?.into_owned(),
                    ))
                }
                Event::CData(c) => {
                    return Ok(Token::Text(
                        String::from_utf8_lossy(&c.into_inner()).into_owned(),
                    ))
                }
                Event::Start(start) => return Ok(Token::Open(scan_tag(&start)?)),
                Event::End(end) => {
                    return Ok(Token::Close(
                        String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase(),
                    ))
                }
                Event::Eof => return Ok(Token::Eof),
                Event::Empty(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
            }
        }
    }
}

fn scan_tag(start: &BytesStart<'_>) -> Result<Tag, HtmlError> {
    let mut tag = Tag::named(String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase());
    for attr in start.html_attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let slot = match key.as_str() {
            "href" => &mut tag.href,
            "class" => &mut tag.class,
            "language" => &mut tag.language,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(
                attr.unescape_value()
                    .map_err(quick_xml::Error::from)?
                    .into_owned(),
            );
        }
    }
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_lowercase_tag_names() {
        let mut scanner = Scanner::new("<B>x</B>");
        assert!(matches!(scanner.next_token().unwrap(), Token::Open(t) if t.name == "b"));
        assert!(matches!(scanner.next_token().unwrap(), Token::Text(t) if t == "x"));
        assert!(matches!(scanner.next_token().unwrap(), Token::Close(n) if n == "b"));
        assert!(matches!(scanner.next_token().unwrap(), Token::Eof));
    }

    #[test]
    fn test_recognized_attributes_are_captured() {
        let mut scanner = Scanner::new(r#"<pre language="rust" id="snippet">x</pre>"#);
        match scanner.next_token().unwrap() {
            Token::Open(tag) => {
                assert_eq!(tag.name, "pre");
                assert_eq!(tag.language.as_deref(), Some("rust"));
                assert_eq!(tag.href, None);
            }
            other => panic!("expected open tag, got {other:?}"),
        }
    }

    #[test]
    fn test_text_entities_resolved() {
        let mut scanner = Scanner::new("1 &lt; 2 &amp; true");
        assert!(matches!(
            scanner.next_token().unwrap(),
            Token::Text(t) if t == "1 < 2 & true"
        ));
    }

    #[test]
    fn test_comments_and_self_closing_skipped() {
        let mut scanner = Scanner::new("<!-- note --><br/>done");
        assert!(matches!(scanner.next_token().unwrap(), Token::Text(t) if t == "done"));
        assert!(matches!(scanner.next_token().unwrap(), Token::Eof));
    }
}
