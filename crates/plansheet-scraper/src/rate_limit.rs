//! Request pacing and the single blocked-page retry.
//!
//! Every page fetch is separated from the previous one by a randomized
//! pause. A page that comes back blocked is retried exactly once after a
//! fixed backoff; other failures are returned immediately.

use std::future::Future;
use std::time::Duration;

use rand::{rng, Rng};

use crate::error::ScraperError;

/// Randomized delay between consecutive requests: `base_ms` plus a uniform
/// extra of up to `jitter_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub base_ms: u64,
    pub jitter_ms: u64,
}

impl Pacing {
    /// No delay at all. Used by tests and offline runs.
    pub const NONE: Self = Self {
        base_ms: 0,
        jitter_ms: 0,
    };

    #[must_use]
    pub fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }

    /// Picks the next delay.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        let extra = if self.jitter_ms == 0 {
            0
        } else {
            rng().random_range(0..=self.jitter_ms)
        };
        Duration::from_millis(self.base_ms.saturating_add(extra))
    }

    /// Sleeps for [`Self::next_delay`]. Returns immediately for [`Pacing::NONE`].
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn is_retriable(err: &ScraperError) -> bool {
    matches!(err, ScraperError::Blocked { .. })
}

/// Runs `operation`; if it fails with [`ScraperError::Blocked`], waits
/// `backoff_ms` and runs it once more. The second outcome is returned as-is.
pub(crate) async fn retry_once_on_blocked<T, F, Fut>(
    backoff_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    match operation().await {
        Err(err) if is_retriable(&err) => {
            tracing::warn!(
                backoff_ms,
                error = %err,
                "blocked page; retrying once after backoff"
            );
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            operation().await
        }
        other => other,
    }
}
