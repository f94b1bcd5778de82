//! Per-call request description and per-client configuration.
//!
//! Both types hold named optional fields with documented defaults so there
//! is exactly one way to describe a call, not one overload per combination
//! of encoding, headers, timeout and credentials.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::http::HttpMethod;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_ENCODING: &str = "UTF-8";
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 30_000;
/// Body text reported when a response carried no entity.
pub const NO_CONTENT: &str = "NoContent";
pub const FAILURE_MESSAGE_PREFIX: &str = "The http request returned ";

/// Resolve a caller timeout; anything below one millisecond means default.
pub fn resolve_timeout(timeout_millis: u64) -> Duration {
    if timeout_millis < 1 {
        Duration::from_millis(DEFAULT_TIMEOUT_MILLIS)
    } else {
        Duration::from_millis(timeout_millis)
    }
}

/// Username and password for HTTP Basic Authentication.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything `RequestExecutor::execute` needs for one call.
///
/// Built with [`RequestSpec::get`] or [`RequestSpec::post`] and the chained
/// setters, then handed to the executor by reference.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<String>,
    /// Sent in order; repeated names are all sent.
    pub headers: Vec<(String, String)>,
    /// Charset name; `None` or empty means UTF-8.
    pub encoding: Option<String>,
    /// `0` means [`DEFAULT_TIMEOUT_MILLIS`].
    pub timeout_millis: u64,
    /// When set, Basic Authentication is required for the call.
    pub credentials: Option<Credentials>,
    pub include_response_headers: bool,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            headers: Vec::new(),
            encoding: None,
            timeout_millis: 0,
            credentials: None,
            include_response_headers: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn timeout_millis(mut self, timeout_millis: u64) -> Self {
        self.timeout_millis = timeout_millis;
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn include_response_headers(mut self, include: bool) -> Self {
        self.include_response_headers = include;
        self
    }
}

/// Configuration for a `TypedClient`.
///
/// `url` is required; every other field has a default, so the struct can be
/// loaded from a partial JSON or TOML document:
///
/// ```
/// # use typed_http::ClientConfig;
/// let config: ClientConfig = serde_json::from_str(
///     r#"{"url": "http://localhost:3000/get", "timeout_millis": 5000}"#,
/// ).unwrap();
/// assert!(config.credentials.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    pub url: String,
    /// Enables Basic Authentication for every call the client makes.
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub timeout_millis: u64,
    #[serde(default)]
    pub include_response_headers: bool,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn timeout_millis(mut self, timeout_millis: u64) -> Self {
        self.timeout_millis = timeout_millis;
        self
    }

    pub fn include_response_headers(mut self, include: bool) -> Self {
        self.include_response_headers = include;
        self
    }

    /// The request description for one call made with this configuration.
    pub fn request_spec(&self, method: HttpMethod) -> RequestSpec {
        RequestSpec {
            url: self.url.clone(),
            method,
            body: None,
            headers: self.headers.clone(),
            encoding: self.encoding.clone(),
            timeout_millis: self.timeout_millis,
            credentials: self.credentials.clone(),
            include_response_headers: self.include_response_headers,
        }
    }
}
