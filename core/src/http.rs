//! HTTP request/response types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `DesignerNewsClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the `HttpResponse` it
//! gets back. The transport is the only place that touches the network, so
//! tests can swap in a fake that records requests instead of sending them.
//!
//! All fields use owned types (`String`, `Vec`) so values can be stored,
//! cloned and compared freely by test doubles.

use std::fmt;
use std::time::Duration;

use crate::error::TransportError;

/// HTTP method for a request. The remote API only uses GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `DesignerNewsClient::build_request`. `url` is absolute and already
/// carries the query string. The timeouts are part of the request so every
/// transport applies the same limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl HttpRequest {
    /// First header value whose name matches `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Executes one `HttpRequest` and returns the raw response.
///
/// Implementations must return `Ok` for every response the server actually
/// sent, whatever its status code. `Err` is reserved for failures to complete
/// the exchange at all.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}
