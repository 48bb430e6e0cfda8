/// Configures timeout and retry behavior for the executor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutorOptions {
    /// Per-attempt timeout in milliseconds, used when the request does not
    /// carry its own override.
    pub default_timeout_ms: u64,
    /// Total attempts allowed for GET requests (1 = no retry). Other methods
    /// always get exactly one attempt.
    pub read_attempts: usize,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub retry_backoff_ms: u64,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            default_timeout_ms: 60_000,
            read_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}
