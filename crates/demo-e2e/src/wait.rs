// Wait - Bounded polling for asynchronously updated state
//
// The target applications update the DOM and their persisted state some time
// after a user action. Anything that reads such state goes through
// `Poll::until`, which re-checks until the condition holds or the timeout
// elapses. Never sample once.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for polled conditions (5 seconds, matching the driver's assertions)
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Default interval between attempts (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    /// Condition holds; polling stops with this value
    Ready(T),
    /// Condition does not hold yet; carries a rendering of what was observed
    Pending(String),
}

/// Handed to the caller when the timeout elapses without a `Ready` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stalled {
    pub last_observed: String,
    pub waited: Duration,
}

/// Timeout and interval for a polled condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poll {
    timeout: Duration,
    interval: Duration,
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Poll {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Re-runs `attempt` until it reports [`Attempt::Ready`].
    ///
    /// The attempt always runs at least once. An attempt error aborts the wait
    /// immediately. The timeout bounds the whole wait, attempts included: an
    /// attempt still running at the deadline is dropped. When the timeout
    /// elapses, `on_stall` turns the last observation into the caller's error.
    pub async fn until<T, F, Fut, S>(&self, mut attempt: F, on_stall: S) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Attempt<T>>>,
        S: FnOnce(Stalled) -> Error,
    {
        let start = Instant::now();
        let mut last_observed: Option<String> = None;

        loop {
            let remaining = self.timeout.saturating_sub(start.elapsed());
            match tokio::time::timeout(remaining, attempt()).await {
                Ok(Ok(Attempt::Ready(value))) => return Ok(value),
                Ok(Ok(Attempt::Pending(observed))) => last_observed = Some(observed),
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    let waited = start.elapsed();
                    return Err(on_stall(Stalled {
                        last_observed: last_observed.unwrap_or_else(|| {
                            format!("no attempt completed within {:?}", waited)
                        }),
                        waited,
                    }));
                }
            }

            let waited = start.elapsed();
            if waited >= self.timeout {
                return Err(on_stall(Stalled {
                    last_observed: last_observed.unwrap_or_default(),
                    waited,
                }));
            }

            tokio::time::sleep(self.interval.min(self.timeout - waited)).await;
        }
    }
}
