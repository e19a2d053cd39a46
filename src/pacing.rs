//! Pacing primitives shared by retry backoff and bulk rate limiting.
//!
//! Every suspension the pipeline makes on purpose goes through a [`Sleeper`], so tests can
//! observe the exact delays without waiting for them.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fixed pause applied after every processed item.
#[derive(Clone)]
pub struct ItemPacer {
    interval: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl ItemPacer {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(interval: Duration, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { interval, sleeper }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait out the pause that follows an item, whatever its outcome.
    pub async fn after_item(&self) {
        if !self.interval.is_zero() {
            self.sleeper.sleep(self.interval).await;
        }
    }
}

impl Default for ItemPacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Arc::new(TokioSleeper))
    }
}
