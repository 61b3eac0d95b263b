//! Startup retry with exponential backoff and jitter.
//!
//! Used only while establishing the MongoDB connection; request handlers
//! never retry.

use std::collections::hash_map::RandomState;
use std::future::Future;
use std::hash::BuildHasher;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

/// Backoff policy for startup connection attempts
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound for a single wait
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Wait a random 50-100% of the computed delay
    pub jitter: bool,
}

impl Default for RetryConfig {
    /// 5 retries, 500ms doubling up to 10s, with jitter
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay before retry number `retry` (0-based), before jitter
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = self.multiplier.powi(retry.min(i32::MAX as u32) as i32);
        self.initial_delay
            .mul_f64(factor.min(u32::MAX as f64))
            .min(self.max_delay)
    }

    fn delay_for(&self, retry: u32) -> Duration {
        let delay = self.backoff(retry);
        if self.jitter { jittered(delay) } else { delay }
    }
}

fn jittered(delay: Duration) -> Duration {
    let seed = RandomState::new().hash_one(SystemTime::now());
    let factor = 0.5 + (seed % 51) as f64 / 100.0;
    delay.mul_f64(factor)
}

/// Run `operation` until it succeeds or the policy is exhausted; the last
/// error is returned.
///
/// ```ignore
/// let client = retry_with_backoff(|| connect_from_config(&config), RetryConfig::default()).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, policy: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if retries > 0 {
                    info!(retries, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if retries >= policy.max_retries => {
                warn!(attempts = retries + 1, error = %e, "Giving up");
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_for(retries);
                warn!(
                    attempt = retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
                retries += 1;
            }
        }
    }
}

/// [`retry_with_backoff`] with [`RetryConfig::default`]
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
