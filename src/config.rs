/// Client configuration: endpoint, API version and transport retry policy.
use std::time::Duration;

/// Default Pardot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://pi.pardot.com/api";

/// Pardot API version targeted by the registry.
pub const DEFAULT_API_VERSION: u32 = 3;

/// Retries beyond this index reuse its backoff factor (fib(10) = 55).
pub const MAX_BACKOFF_INDEX: u32 = 10;

/// Retry behavior for transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt (default: 0).
    pub max_retries: u32,
    /// Unit multiplied by the Fibonacci factor (default: 1s).
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Delay before retry `attempt` (1-indexed): `base_delay * fib(min(attempt, 10))`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * fibonacci(attempt.min(MAX_BACKOFF_INDEX))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// The `n`th Fibonacci number with fib(1) = fib(2) = 1 and fib(0) = 0.
pub fn fibonacci(n: u32) -> u32 {
    let (mut a, mut b) = (0u32, 1u32);
    for _ in 0..n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

/// Configuration shared by every resource proxy of a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub api_version: u32,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Point the client at a different endpoint, e.g. a sandbox or a mock server.
    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            api_version: DEFAULT_API_VERSION,
            retry: RetryPolicy::default(),
        }
    }
}
