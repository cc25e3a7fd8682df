//! Retry policy and backoff scheduling for the request executor.

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::{header::HeaderMap, StatusCode};

/// Exponential backoff configuration.
///
/// Without a policy the executor attempts every call exactly once. With one,
/// retryable failures (transport errors, 429 and 503) are retried up to
/// `retry_max` times. Retrying 500, 502 and 504 as well requires
/// [`with_server_error_retries(true)`](Self::with_server_error_retries).
///
/// The delay before retry `n` (0-based) is `initial_delay` for `n == 0` and
/// `min(wait_max, wait_min * 2^n)` afterwards. A numeric `Retry-After`
/// header on a 429/503 response replaces the computed delay.
///
/// ```
/// use novu_http::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_retry_max(5)
///     .with_initial_delay(Duration::from_millis(100))
///     .with_wait_min(Duration::from_millis(200))
///     .with_wait_max(Duration::from_secs(10));
/// assert_eq!(policy.backoff(0), Duration::from_millis(100));
/// assert_eq!(policy.backoff(2), Duration::from_millis(800));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Base of the exponential schedule.
    pub wait_min: Duration,
    /// Upper bound for any computed delay.
    pub wait_max: Duration,
    /// Maximum number of retries after the initial attempt.
    pub retry_max: u32,
    /// Also retry 500, 502 and 504 responses.
    pub retry_server_errors: bool,
}

impl RetryPolicy {
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);
    pub const DEFAULT_WAIT_MIN: Duration = Duration::from_secs(1);
    pub const DEFAULT_WAIT_MAX: Duration = Duration::from_secs(30);
    pub const DEFAULT_RETRY_MAX: u32 = 4;

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            wait_min: Self::DEFAULT_WAIT_MIN,
            wait_max: Self::DEFAULT_WAIT_MAX,
            retry_max: Self::DEFAULT_RETRY_MAX,
            retry_server_errors: false,
        }
    }

    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    #[must_use]
    pub const fn with_wait_min(mut self, delay: Duration) -> Self {
        self.wait_min = delay;
        self
    }

    #[must_use]
    pub const fn with_wait_max(mut self, delay: Duration) -> Self {
        self.wait_max = delay;
        self
    }

    #[must_use]
    pub const fn with_retry_max(mut self, retry_max: u32) -> Self {
        self.retry_max = retry_max;
        self
    }

    /// Treats 500, 502 and 504 like 503.
    #[must_use]
    pub const fn with_server_error_retries(mut self, enabled: bool) -> Self {
        self.retry_server_errors = enabled;
        self
    }

    /// Computed delay before retry `retry` (0-based), ignoring server hints.
    ///
    /// Overflow of `wait_min * 2^retry` clamps to `wait_max`.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 {
            return self.initial_delay;
        }
        1u32.checked_shl(retry)
            .and_then(|factor| self.wait_min.checked_mul(factor))
            .map_or(self.wait_max, |delay| delay.min(self.wait_max))
    }

    /// Delay before retry `retry`, honoring a `Retry-After` hint when present.
    #[must_use]
    pub fn delay_for(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.backoff(retry))
    }

    /// Whether another attempt is allowed after `retries_done` retries.
    #[must_use]
    pub const fn allows_retry(&self, retries_done: u32) -> bool {
        retries_done < self.retry_max
    }

    /// Whether a response status is worth retrying under this policy.
    #[must_use]
    pub fn retries_status(&self, status: StatusCode) -> bool {
        match status {
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => true,
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::GATEWAY_TIMEOUT => self.retry_server_errors,
            _ => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a `Retry-After` header expressed in whole seconds.
///
/// Only honored for 429 and 503 responses. HTTP-date values are ignored.
pub(crate) fn retry_after(status: StatusCode, headers: &HeaderMap) -> Option<Duration> {
    if status != StatusCode::TOO_MANY_REQUESTS && status != StatusCode::SERVICE_UNAVAILABLE {
        return None;
    }
    let seconds = headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;
    Some(Duration::from_secs(seconds))
}

/// Boxed future returned by [`Sleeper::sleep`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Waits between retry attempts.
///
/// Swap in a custom implementation with
/// [`NovuClient::with_sleeper`](crate::NovuClient::with_sleeper) to observe
/// or skip backoff delays in tests.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration) -> SleepFuture<'_>;
}

/// Production sleeper backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, delay: Duration) -> SleepFuture<'_> {
        Box::pin(tokio::time::sleep(delay))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::{
        header::{HeaderMap, HeaderValue, RETRY_AFTER},
        StatusCode,
    };

    use super::{retry_after, RetryPolicy};

    fn policy() -> RetryPolicy {
        RetryPolicy::new()
            .with_initial_delay(Duration::from_millis(50))
            .with_wait_min(Duration::from_millis(100))
            .with_wait_max(Duration::from_secs(1))
    }

    #[test]
    fn first_retry_uses_initial_delay() {
        assert_eq!(policy().backoff(0), Duration::from_millis(50));
    }

    #[test]
    fn later_retries_double_from_wait_min_until_clamped() {
        let policy = policy();
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
        assert_eq!(policy.backoff(3), Duration::from_millis(800));
        assert_eq!(policy.backoff(4), Duration::from_secs(1));
        assert_eq!(policy.backoff(10), Duration::from_secs(1));
    }

    #[test]
    fn backoff_is_non_decreasing_after_first_retry() {
        let policy = policy();
        let delays: Vec<_> = (1..40).map(|n| policy.backoff(n)).collect();
        assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn overflowing_exponent_clamps_to_wait_max() {
        let policy = RetryPolicy::new()
            .with_wait_min(Duration::from_secs(u64::MAX / 2))
            .with_wait_max(Duration::from_secs(30));
        assert_eq!(policy.backoff(1), Duration::from_secs(30));
        assert_eq!(policy.backoff(31), Duration::from_secs(30));
        assert_eq!(policy.backoff(32), Duration::from_secs(30));
        assert_eq!(policy.backoff(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn retry_after_overrides_computed_delay() {
        let policy = policy();
        assert_eq!(
            policy.delay_for(3, Some(Duration::from_secs(2))),
            Duration::from_secs(2)
        );
        assert_eq!(policy.delay_for(3, None), Duration::from_millis(800));
    }

    #[test]
    fn retry_budget_counts_retries_not_attempts() {
        let policy = RetryPolicy::new().with_retry_max(2);
        assert!(policy.allows_retry(0));
        assert!(policy.allows_retry(1));
        assert!(!policy.allows_retry(2));
        assert!(!RetryPolicy::new().with_retry_max(0).allows_retry(0));
    }

    #[test]
    fn server_errors_need_opt_in() {
        let strict = RetryPolicy::new();
        let lenient = RetryPolicy::new().with_server_error_retries(true);

        assert!(strict.retries_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(strict.retries_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!strict.retries_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(lenient.retries_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!lenient.retries_status(StatusCode::NOT_IMPLEMENTED));
        assert!(!lenient.retries_status(StatusCode::NOT_FOUND));
    }

    #[test]
    fn parses_numeric_retry_after_for_throttling_statuses() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static(" 2 "));

        assert_eq!(
            retry_after(StatusCode::SERVICE_UNAVAILABLE, &headers),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            retry_after(StatusCode::TOO_MANY_REQUESTS, &headers),
            Some(Duration::from_secs(2))
        );
        assert_eq!(retry_after(StatusCode::INTERNAL_SERVER_ERROR, &headers), None);
    }

    #[test]
    fn ignores_http_date_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(retry_after(StatusCode::TOO_MANY_REQUESTS, &headers), None);
    }
}
