//! HTTP wire types exchanged between the executor and a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. The executor builds an
//! `HttpRequest` and classifies an `HttpResponse` without touching the
//! network; the transport in between is the only piece that does I/O. This
//! keeps validation, header assembly and status classification
//! deterministic and lets tests swap in a recording transport.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
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
/// Headers keep insertion order and may repeat a name; the transport must
/// send every entry. `body` is already encoded with the request charset.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Applied to connect, send and both receive phases.
    pub timeout: Duration,
}

impl HttpRequest {
    /// First header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `body` is `None` when the response carried no entity at all, which is
/// distinct from an entity of length zero.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}
