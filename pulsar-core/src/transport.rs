//! # Network boundary (Transport)
//!
//! Everything Pulsar fetches goes through a [`Transport`]: route markup and
//! API calls alike. The trait is deliberately tiny so a browser `fetch`
//! binding, a `reqwest` client, or a scripted test double all fit.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Transport`] uses native `async fn` for static dispatch. Components that
//! store a transport behind an `Arc` use [`DynTransport`], which every
//! `Transport` implements automatically.

use crate::error::BoxError;
use std::{fmt, future::Future, pin::Pin};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `QUERY`
    Query,
}

impl Method {
    /// The method as it appears on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Query => "QUERY",
        }
    }

    /// Whether requests with this method carry a body.
    pub const fn has_body(self) -> bool {
        matches!(
            self,
            Method::Post | Method::Patch | Method::Put | Method::Query
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Absolute or page-relative URL.
    pub url: String,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a plain `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A response received from a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The network boundary.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Transport`",
    label = "missing `Transport` implementation",
    note = "Transports must implement `send`."
)]
pub trait Transport: Send + Sync + 'static {
    /// Send `request` and wait for the full response.
    ///
    /// Non-2xx statuses are responses, not errors. Errors mean no response
    /// was obtained at all.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Transport`].
pub trait DynTransport: Send + Sync + 'static {
    /// Send `request` (dynamic dispatch version).
    fn send_dyn(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, BoxError>> + Send + '_>>;
}

// Blanket implementation: Any type implementing Transport implements DynTransport automatically.
impl<T: Transport> DynTransport for T {
    fn send_dyn(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, BoxError>> + Send + '_>> {
        Box::pin(self.send(request))
    }
}
