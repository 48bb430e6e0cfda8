use std::time::Duration;

use reqwest::{header, StatusCode};
use tokio::time::sleep;

use crate::{
    counter::InFlight, ExecutorOptions, FetchError, FetchRequest, Payload, Result,
};

/// Executes one outbound HTTP request at a time per call, with a per-attempt
/// timeout, cooperative cancellation, and bounded retry for GET.
///
/// Cloning is cheap and clones share the underlying connection pool and the
/// in-flight counter.
#[derive(Clone, Debug, Default)]
pub struct Fetcher {
    http: reqwest::Client,
    options: ExecutorOptions,
    in_flight: InFlight,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies executor options such as timeout and retry behavior.
    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    /// Handle to the in-flight counter shared by all clones of this executor.
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    /// Resolves a request into a response or a classified failure.
    ///
    /// The response is returned as-is for every status below 500 except 429;
    /// the caller branches on 2xx/3xx/4xx itself. Statuses >= 500 and 429
    /// fail immediately without retry. Transport-class failures (network
    /// errors, attempt timeouts) are retried with exponential backoff, but
    /// only for GET; other methods get exactly one attempt.
    pub async fn execute(&self, request: FetchRequest) -> Result<reqwest::Response> {
        let _guard = self.in_flight.start();

        let FetchRequest {
            method,
            url,
            accept,
            payload,
            cancel,
            timeout_ms,
        } = request;

        let cancel = cancel.unwrap_or_default();
        let timeout =
            Duration::from_millis(timeout_ms.unwrap_or(self.options.default_timeout_ms));
        let max_attempts = if method.is_idempotent_read() {
            self.options.read_attempts.max(1)
        } else {
            1
        };
        // GET never carries a body. Non-GET methods get a single attempt, so
        // the payload is consumed at most once.
        let mut payload = if method.is_idempotent_read() {
            None
        } else {
            payload
        };

        let mut attempt = 0usize;
        while attempt < max_attempts {
            if cancel.is_cancelled() {
                return Err(FetchError::Aborted);
            }

            let mut builder = self
                .http
                .request(method.as_reqwest(), &url)
                .header(header::ACCEPT, accept.header_value())
                .timeout(timeout);
            match payload.take() {
                Some(Payload::Json(body)) => builder = builder.json(&body),
                Some(Payload::Multipart(form)) => builder = builder.multipart(form),
                None => {}
            }

            // Dropping the send future on the cancelled arm aborts the
            // transport; the attempt's timer and token borrow go with it.
            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(FetchError::Aborted),
                outcome = builder.send() => outcome,
            };

            match outcome {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        return Err(FetchError::rate_limited(status));
                    }
                    if status.is_server_error() {
                        return Err(FetchError::server(status));
                    }
                    return Ok(response);
                }
                Err(err) => {
                    // An abort racing the transport can surface as a
                    // transport error; the token state decides attribution,
                    // not which future settled first.
                    if cancel.is_cancelled() {
                        return Err(FetchError::Aborted);
                    }
                    if is_transient(&err) && attempt + 1 < max_attempts {
                        self.wait_before_retry(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    if err.is_timeout() {
                        return Err(FetchError::TimedOut);
                    }
                    return Err(FetchError::transport(err));
                }
            }
        }

        // Unreachable while max_attempts >= 1: the final attempt always
        // returns. Kept as a safety net.
        Err(FetchError::generic())
    }

    /// Waits before the next retry attempt (exponential backoff).
    async fn wait_before_retry(&self, attempt: usize) {
        let delay_ms = backoff_delay_ms(self.options.retry_backoff_ms, attempt);

        #[cfg(feature = "tracing")]
        tracing::debug!("retrying request after {} ms", delay_ms);

        sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// Only network-class failures and timeouts are worth re-issuing; builder
/// and redirect-policy errors fail the same way every time.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

fn backoff_delay_ms(base_ms: u64, attempt: usize) -> u64 {
    let exp = attempt.min(16) as u32;
    base_ms.saturating_mul(1u64 << exp)
}
