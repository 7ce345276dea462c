//! Retry logic with exponential backoff for transient connection failures
//!
//! Used by executors only. The resolver and renderer never retry: their
//! failures are deterministic for a given input.

use crate::constants::{
    DEFAULT_CONNECT_RETRIES, RETRY_BACKOFF_MULTIPLIER, RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_MS,
};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial attempt)
    pub max_retries: u32,
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (typically 2.0)
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_CONNECT_RETRIES,
            initial_delay: Duration::from_millis(RETRY_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(RETRY_MAX_DELAY_MS),
            backoff_multiplier: RETRY_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries (fail fast)
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1.0,
        }
    }

    /// Default backoff with a caller-chosen number of retries
    pub fn with_retries(max_retries: u32) -> Self {
        if max_retries == 0 {
            return Self::no_retry();
        }
        Self {
            max_retries,
            ..Self::default()
        }
    }
}

/// Retry an async operation with exponential backoff
///
/// # Arguments
///
/// * `config` - Retry configuration
/// * `operation` - Async closure that returns Result<T, E>
/// * `is_retryable` - Function to determine if an error is worth retrying
///
/// # Example
///
/// ```ignore
/// let session = retry_with_backoff(
///     RetryConfig::default(),
///     || async { connect(&spec).await },
///     ConnectionError::is_transient,
/// ).await?;
/// ```
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    config: RetryConfig,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(err) => {
                attempt += 1;

                if attempt > config.max_retries || !is_retryable(&err) {
                    return Err(err);
                }

                tracing::debug!(
                    attempt,
                    max_attempts = config.max_retries + 1,
                    ?delay,
                    "attempt failed: {err}; retrying"
                );

                sleep(delay).await;

                // Exponential backoff with ±20% jitter
                let next_delay_ms = (delay.as_millis() as f64 * config.backoff_multiplier) as u64;
                let base_delay = Duration::from_millis(next_delay_ms).min(config.max_delay);

                let jitter_factor = rand::thread_rng().gen_range(0.8..=1.2);
                let jittered_delay_ms = (base_delay.as_millis() as f64 * jitter_factor) as u64;
                delay = Duration::from_millis(jittered_delay_ms);
            }
        }
    }
}
