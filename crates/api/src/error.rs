use thiserror::Error;

/// Result type alias for Bot API calls.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from Bot API calls.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `ok: false`.
    #[error("api error {code}: {description}")]
    Api {
        code: i64,
        description: String,
        /// Flood-control hint from the server, seconds to wait.
        retry_after: Option<i64>,
    },

    /// The response body did not decode as the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
