use crate::RetryPolicy;

/// Configures HTTP timeout, deadline and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Budget for one logical call, covering every attempt and backoff sleep.
    pub deadline_ms: Option<u64>,
    /// Retry policy. `None` means every call is attempted exactly once.
    pub retry: Option<RetryPolicy>,
}

impl ClientOptions {
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            deadline_ms: None,
            retry: None,
        }
    }
}
