use anyhow::{Context, Result};

/// CLI configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token from @BotFather.
    pub token: String,
    /// Override for self-hosted Bot API servers.
    pub api_url: Option<String>,
    /// Log level when RUST_LOG is unset.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: std::env::var("GRAMWIRE_BOT_TOKEN")
                .context("GRAMWIRE_BOT_TOKEN is not set")?,
            api_url: std::env::var("GRAMWIRE_API_URL").ok(),
            log_level: std::env::var("GRAMWIRE_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
