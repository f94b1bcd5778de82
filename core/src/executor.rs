//! Builds, sends and classifies a single HTTP call.
//!
//! # Design
//! `execute` is three steps. `build_request` validates the `RequestSpec` and
//! assembles headers, body and timeout without I/O. The transport performs
//! the exchange. `parse_response` decodes the body and classifies the
//! status: `[100, 400)` is success, everything else becomes a `CallFailure`.
//! The first and last steps are public so they can be tested and reused
//! without a network.

use std::collections::HashMap;

use log::{debug, warn};

use crate::auth::{basic_auth_value, AUTHORIZATION};
use crate::config::{resolve_timeout, RequestSpec, DEFAULT_CONTENT_TYPE, NO_CONTENT};
use crate::encoding::Charset;
use crate::error::{CallError, CallFailure};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

pub const CONTENT_TYPE: &str = "Content-Type";

/// Whether a status code counts as a successful call.
pub fn is_success(status: u16) -> bool {
    (100..400).contains(&status)
}

/// A successful response. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    reason: String,
    body: Option<String>,
    headers: Option<HashMap<String, String>>,
}

impl RawResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The decoded body, `None` when the response had no entity.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The decoded body, or `"NoContent"` when the response had no entity.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or(NO_CONTENT)
    }

    /// True iff the response carried an entity, even an empty one.
    pub fn is_body_present(&self) -> bool {
        self.body.is_some()
    }

    /// Response headers, only when the request asked for them.
    pub fn headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }
}

/// Executes `RequestSpec`s over a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor<T = UreqTransport> {
    transport: T,
}

impl RequestExecutor<UreqTransport> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transport> RequestExecutor<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn execute(&self, spec: &RequestSpec) -> Result<RawResponse, CallError> {
        let request = build_request(spec)?;
        let charset = Charset::resolve(spec.encoding.as_deref())?;
        debug!(
            "{} {} ({} headers, timeout {:?})",
            request.method,
            request.url,
            request.headers.len(),
            request.timeout
        );
        let response = self.transport.send(&request).map_err(|err| {
            warn!("{} {} transport error: {err}", request.method, request.url);
            CallError::from(err)
        })?;
        parse_response(response, charset, spec.include_response_headers)
    }
}

/// Validate `spec` and assemble the outgoing request.
pub fn build_request(spec: &RequestSpec) -> Result<HttpRequest, CallError> {
    if spec.url.is_empty() {
        return Err(CallError::InvalidArgument("url"));
    }
    if let Some(credentials) = &spec.credentials {
        if credentials.username.is_empty() {
            return Err(CallError::InvalidArgument("username"));
        }
        if credentials.password.is_empty() {
            return Err(CallError::InvalidArgument("password"));
        }
    }
    let charset = Charset::resolve(spec.encoding.as_deref())?;

    let mut headers = Vec::with_capacity(spec.headers.len() + 2);
    if let Some(credentials) = &spec.credentials {
        headers.push((AUTHORIZATION.to_string(), basic_auth_value(credentials)));
    }
    headers.extend(spec.headers.iter().cloned());
    let has_content_type = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE));
    if !has_content_type {
        headers.push((CONTENT_TYPE.to_string(), DEFAULT_CONTENT_TYPE.to_string()));
    }

    let body = match (spec.method, spec.body.as_deref()) {
        (HttpMethod::Post, Some(text)) if !text.is_empty() => Some(charset.encode(text)),
        _ => None,
    };

    Ok(HttpRequest {
        method: spec.method,
        url: spec.url.clone(),
        headers,
        body,
        timeout: resolve_timeout(spec.timeout_millis),
    })
}

/// Decode and classify a transport response.
pub fn parse_response(
    response: HttpResponse,
    charset: Charset,
    include_headers: bool,
) -> Result<RawResponse, CallError> {
    let HttpResponse {
        status,
        reason,
        headers,
        body,
    } = response;
    let body = body.map(|bytes| charset.decode(&bytes));

    if is_success(status) {
        debug!("status {status} {reason}, body present: {}", body.is_some());
        return Ok(RawResponse {
            status,
            reason,
            body,
            headers: include_headers.then(|| header_map(headers)),
        });
    }

    warn!("status {status} {reason} is outside the success range");
    let body = body.unwrap_or_else(|| NO_CONTENT.to_string());
    Err(CallFailure::new(status, reason, body, header_map(headers)).into())
}

/// Collapse headers into a map; a repeated name keeps its last value.
pub fn header_map(headers: Vec<(String, String)>) -> HashMap<String, String> {
    headers.into_iter().collect()
}
