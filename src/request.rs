use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::FetchError;

/// HTTP method of a request. Only GET is eligible for retry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// True only for GET. Side-effecting methods must not be silently
    /// re-issued, so they never retry.
    pub fn is_idempotent_read(self) -> bool {
        matches!(self, Self::Get)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Selects the `Accept` header sent with the request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AcceptKind {
    Json,
    Html,
    Csv,
}

impl AcceptKind {
    pub(crate) fn header_value(self) -> &'static str {
        match self {
            Self::Json => "application/json, text/html",
            Self::Html => "text/html",
            Self::Csv => "text/csv",
        }
    }
}

/// Request body for non-GET methods.
#[derive(Debug)]
pub enum Payload {
    /// Serialized as a JSON text body with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Passed through unchanged; the transport sets the multipart boundary,
    /// so no `Content-Type` is set manually.
    Multipart(reqwest::multipart::Form),
}

/// Immutable description of one outbound call.
///
/// Build with a method constructor and `with_*` combinators:
///
/// ```no_run
/// use sturdy_fetch::{AcceptKind, FetchRequest};
///
/// let request = FetchRequest::get("https://example.com/report")
///     .with_accept(AcceptKind::Csv)
///     .with_timeout_ms(5_000);
/// ```
#[derive(Debug)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute or relative request target.
    pub url: String,
    /// `Accept` header selection. Defaults to [`AcceptKind::Json`].
    pub accept: AcceptKind,
    /// Body for non-GET methods; ignored for GET.
    pub payload: Option<Payload>,
    /// External cancellation source. Polled for "already cancelled" before
    /// dispatch and raced against every attempt.
    pub cancel: Option<CancellationToken>,
    /// Per-attempt timeout override in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl FetchRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            accept: AcceptKind::Json,
            payload: None,
            cancel: None,
            timeout_ms: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_accept(mut self, accept: AcceptKind) -> Self {
        self.accept = accept;
        self
    }

    /// Attaches a JSON body, serialized up front.
    ///
    /// A value that cannot be serialized surfaces as the generic response
    /// failure here rather than at dispatch.
    pub fn with_json(mut self, body: &impl Serialize) -> crate::Result<Self> {
        let value = serde_json::to_value(body).map_err(|_| FetchError::generic())?;
        self.payload = Some(Payload::Json(value));
        Ok(self)
    }

    /// Attaches a multipart form body.
    pub fn with_multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.payload = Some(Payload::Multipart(form));
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}
