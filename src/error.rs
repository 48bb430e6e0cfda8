pub(crate) const GENERIC_FAILURE: &str = "Something went wrong.";
pub(crate) const RATE_LIMITED: &str = "Something went wrong, please try again after some time.";

/// Error type returned by this crate.
///
/// Exactly one of these (or a success) is produced per [`execute`] call.
///
/// [`execute`]: crate::Fetcher::execute
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Caller-initiated cancellation, observed before dispatch or while an
    /// attempt was in flight. Never retried.
    #[error("Request aborted")]
    Aborted,
    /// The per-attempt timeout elapsed with no caller cancellation and no
    /// retries remaining.
    #[error("Request timed out")]
    TimedOut,
    /// Server-reported failure (status >= 500 or 429), a transport failure
    /// after the retry budget is spent, or any unclassified failure.
    #[error("{message}")]
    Response {
        /// HTTP status, when the server produced one.
        status: Option<u16>,
        /// Human-readable message; generic unless overridden for 429.
        message: String,
        /// Underlying transport error, when one exists.
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl FetchError {
    /// Generic response failure with no status and no underlying cause.
    pub(crate) fn generic() -> Self {
        Self::Response {
            status: None,
            message: GENERIC_FAILURE.to_owned(),
            source: None,
        }
    }

    pub(crate) fn server(status: reqwest::StatusCode) -> Self {
        Self::Response {
            status: Some(status.as_u16()),
            message: GENERIC_FAILURE.to_owned(),
            source: None,
        }
    }

    pub(crate) fn rate_limited(status: reqwest::StatusCode) -> Self {
        Self::Response {
            status: Some(status.as_u16()),
            message: RATE_LIMITED.to_owned(),
            source: None,
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Response {
            status: None,
            message: GENERIC_FAILURE.to_owned(),
            source: Some(err),
        }
    }
}
