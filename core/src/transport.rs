//! The I/O seam: something that turns an `HttpRequest` into an `HttpResponse`.
//!
//! # Design
//! `RequestExecutor` owns all decision logic and calls the transport only
//! after validation has passed. The default `UreqTransport` builds a fresh
//! blocking agent for every call so no connection state outlives the call;
//! the agent, the connection and the response body are dropped on every
//! exit path when `send` returns.

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP exchange.
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

/// Blocking transport backed by `ureq`, one agent per call.
///
/// Status codes are returned as data, never as errors; classification is the
/// executor's job. Redirects are not followed and bodies are read in full.
#[derive(Debug, Default, Clone, Copy)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(request: &HttpRequest) -> ureq::Agent {
        let timeout = Some(request.timeout);
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_connect(timeout)
            .timeout_send_request(timeout)
            .timeout_send_body(timeout)
            .timeout_recv_response(timeout)
            .timeout_recv_body(timeout)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = Self::agent(request);
        let failed = |err: ureq::Error| {
            TransportError::with_source(format!("{} {} failed: {err}", request.method, request.url), err)
        };

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(failed)?;

        let status = response.status();
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
        let body = if has_entity(status.as_u16()) {
            let body = response.body_mut().with_config().limit(u64::MAX).read_to_vec();
            Some(body.map_err(failed)?)
        } else {
            None
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// Informational, 204 and 304 responses never carry an entity.
fn has_entity(status: u16) -> bool {
    !(100..200).contains(&status) && status != 204 && status != 304
}
