use thiserror::Error;

/// Errors from HTML → entity conversion. Both abort the whole call; no
/// partial result is ever returned.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// The scanner could not tokenize the input.
    #[error("malformed markup: {0}")]
    MalformedMarkup(#[from] quick_xml::Error),

    /// Strict mode only: an end tag with no open tag, or one that does not
    /// match the innermost open tag.
    #[error("unexpected end tag: </{0}>")]
    UnexpectedEndTag(String),
}
