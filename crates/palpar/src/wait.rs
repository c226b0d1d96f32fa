//! Bounded polling for element-state waits.
//!
//! Every wait is bounded by a timeout; on expiry the operation fails rather
//! than hanging. The bound is strict: a predicate that first holds exactly
//! at the timeout counts as a failure. Probe errors from the driver are
//! propagated unchanged and never converted into timeouts.

use crate::result::{PalparError, PalparResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Timeout for best-effort display probes (5 seconds)
pub const PROBE_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `probe` until it reports `true` or the bound elapses.
///
/// Resolves immediately when the predicate already holds. On expiry, fails
/// with a timeout error carrying `what` and the bound so the message is
/// meaningful in a run report.
///
/// # Errors
///
/// - [`PalparError::Timeout`] when the predicate never holds within the bound
/// - any error returned by `probe`, propagated unchanged
pub async fn poll_until<F, Fut>(
    mut probe: F,
    options: WaitOptions,
    what: &str,
) -> PalparResult<Duration>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PalparResult<bool>>,
{
    let start = Instant::now();
    let timeout = options.timeout();

    while start.elapsed() < timeout {
        if probe().await? {
            return Ok(start.elapsed());
        }
        tokio::time::sleep(options.poll_interval()).await;
    }

    Err(PalparError::Timeout {
        what: what.to_string(),
        ms: options.timeout_ms,
    })
}
