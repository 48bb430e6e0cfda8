//! `sturdy-fetch` is a single outbound HTTP request primitive.
//!
//! One call to [`Fetcher::execute`] resolves a [`FetchRequest`] into either a
//! response or one of three classified failures:
//! - [`FetchError::Aborted`] — the caller's cancellation token fired,
//! - [`FetchError::TimedOut`] — the per-attempt timeout elapsed,
//! - [`FetchError::Response`] — server-reported or transport-level failure.
//!
//! GET requests retry transport-class failures with exponential backoff;
//! side-effecting methods get exactly one attempt.

mod counter;
mod error;
mod executor;
mod options;
mod request;

pub use counter::InFlight;
pub use error::FetchError;
pub use executor::Fetcher;
pub use options::ExecutorOptions;
pub use request::{AcceptKind, FetchRequest, Method, Payload};

pub use tokio_util::sync::CancellationToken;

pub type Result<T> = std::result::Result<T, FetchError>;
