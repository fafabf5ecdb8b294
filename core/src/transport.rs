//! Blocking `Transport` backed by ureq.

use std::io;

use log::trace;
use ureq::{Agent, RequestBuilder};

use crate::error::{TransportError, TransportErrorKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Sends each request on a fresh ureq agent.
///
/// The agent (and its connection pool) lives only for the duration of one
/// `send`, so nothing is shared between calls and the connection is released
/// as soon as the response body has been read. HTTP error statuses are
/// returned as responses, not errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(request: &HttpRequest) -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(request.connect_timeout))
            .timeout_global(Some(request.timeout))
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = Self::agent(request);

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(agent.get(&request.url), &request.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(&request.url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(agent.post(&request.url), &request.headers).send_empty()
            }
        };
        let mut response = result.map_err(map_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(map_error)?;
        trace!("{} {} -> {status} ({} bytes)", request.method, request.url, body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_error(err: ureq::Error) -> TransportError {
    let kind = match &err {
        ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
        ureq::Error::HostNotFound => TransportErrorKind::Dns,
        ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
        ureq::Error::Io(e) => io_kind(e),
        _ => TransportErrorKind::Other,
    };
    TransportError::new(kind, err.to_string())
}

fn io_kind(err: &io::Error) -> TransportErrorKind {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable => TransportErrorKind::Connect,
        io::ErrorKind::TimedOut => TransportErrorKind::Timeout,
        _ => TransportErrorKind::Io,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(io_kind(&refused), TransportErrorKind::Connect);
        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        assert_eq!(io_kind(&timed_out), TransportErrorKind::Timeout);
        let broken = io::Error::from(io::ErrorKind::BrokenPipe);
        assert_eq!(io_kind(&broken), TransportErrorKind::Io);
    }

    #[test]
    fn ureq_errors_are_classified() {
        assert_eq!(map_error(ureq::Error::HostNotFound).kind, TransportErrorKind::Dns);
        assert_eq!(
            map_error(ureq::Error::ConnectionFailed).kind,
            TransportErrorKind::Connect
        );
        let io_err = ureq::Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(map_error(io_err).kind, TransportErrorKind::Connect);
    }
}
