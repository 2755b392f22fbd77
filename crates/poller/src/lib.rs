//! Long-poll update source.
//!
//! Drives `getUpdates` in a loop: each batch advances the confirmation
//! offset past the highest update id seen, so the server discards what was
//! already delivered. Transport and API errors are logged and retried after
//! a fixed backoff; the loop only ends when the update receiver is dropped.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{info, warn};

use gramwire_api::{Bot, GetUpdatesParams};
use gramwire_core::{Update, UpdateSource};

/// Tuning for the long-poll loop.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Server-side long-poll timeout, in seconds.
    pub timeout_secs: i64,
    /// Max updates per batch; unset keeps the server default.
    pub limit: Option<i64>,
    /// Update kinds to receive; unset keeps the server default.
    pub allowed_updates: Option<Vec<String>>,
    /// Sleep after a failed request before polling again.
    pub error_backoff: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            limit: None,
            allowed_updates: None,
            error_backoff: Duration::from_secs(5),
        }
    }
}

/// Long-polling [`UpdateSource`] over a [`Bot`] handle.
pub struct UpdatePoller {
    bot: Bot,
    config: PollerConfig,
}

impl UpdatePoller {
    pub fn new(bot: Bot) -> Self {
        Self::with_config(bot, PollerConfig::default())
    }

    pub fn with_config(bot: Bot, config: PollerConfig) -> Self {
        Self { bot, config }
    }

    async fn poll_loop(&self, tx: mpsc::Sender<Update>) -> Result<()> {
        let mut offset: Option<i64> = None;
        info!(timeout_secs = self.config.timeout_secs, "starting update poll loop");

        loop {
            let params = GetUpdatesParams {
                offset,
                limit: self.config.limit,
                timeout: Some(self.config.timeout_secs),
                allowed_updates: self.config.allowed_updates.clone(),
            };

            match self.bot.get_updates(&params).await {
                Err(e) => {
                    warn!("getUpdates failed: {}", e);
                    tokio::time::sleep(self.config.error_backoff).await;
                }
                Ok(updates) => {
                    for update in updates {
                        offset = Some(next_offset(offset, update.update_id));
                        if tx.send(update).await.is_err() {
                            info!("update receiver closed, stopping poll loop");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

/// Advance the confirmation offset past `update_id`.
fn next_offset(current: Option<i64>, update_id: i64) -> i64 {
    match current {
        Some(offset) => offset.max(update_id + 1),
        None => update_id + 1,
    }
}

#[async_trait]
impl UpdateSource for UpdatePoller {
    fn name(&self) -> &str {
        "longpoll"
    }

    async fn start(&self, tx: mpsc::Sender<Update>) -> Result<()> {
        self.poll_loop(tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_offset_starts_past_first_update() {
        assert_eq!(next_offset(None, 100), 101);
    }

    #[test]
    fn test_next_offset_is_monotonic() {
        let offset = next_offset(Some(101), 100);
        assert_eq!(offset, 101);
        assert_eq!(next_offset(Some(offset), 105), 106);
    }
}
