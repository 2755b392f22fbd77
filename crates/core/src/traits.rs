use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::update::Update;

/// A transport that produces incoming updates: the long-poll loop or the
/// webhook listener.
///
/// Each source runs in its own Tokio task and forwards every update it
/// receives into the given channel. `start` returns when the source shuts
/// down (receiver closed) or fails unrecoverably.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Human-readable source name for logging.
    fn name(&self) -> &str;

    /// Run the source until shutdown, forwarding updates into `tx`.
    async fn start(&self, tx: mpsc::Sender<Update>) -> Result<()>;
}
