//! Typed GET/POST client on top of `RequestExecutor`.
//!
//! # Design
//! `TypedClient` holds a `ClientConfig`, a converter and an executor, and
//! carries no mutable state between calls. `post` serializes the request
//! value with the converter, both call shapes run through the executor, and
//! a present body is deserialized into `Res`. Every failure comes back as a
//! `ClientError`. Basic Authentication is on for every call iff the
//! config carries credentials.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::converter::{JsonConverter, MessageConverter};
use crate::error::ClientError;
use crate::executor::{RawResponse, RequestExecutor};
use crate::http::HttpMethod;
use crate::transport::{Transport, UreqTransport};

/// A successful response with its body parsed into `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedResponse<T> {
    raw: RawResponse,
    parsed: Option<T>,
}

impl<T> TypedResponse<T> {
    pub fn status(&self) -> u16 {
        self.raw.status()
    }

    pub fn reason(&self) -> &str {
        self.raw.reason()
    }

    /// Raw body text, or `"NoContent"` when the response had no entity.
    pub fn body_text(&self) -> &str {
        self.raw.body_text()
    }

    pub fn is_body_present(&self) -> bool {
        self.raw.is_body_present()
    }

    pub fn headers(&self) -> Option<&HashMap<String, String>> {
        self.raw.headers()
    }

    /// The parsed body; `None` iff the response had no entity.
    pub fn parsed(&self) -> Option<&T> {
        self.parsed.as_ref()
    }

    pub fn into_parsed(self) -> Option<T> {
        self.parsed
    }

    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }
}

/// Sends `Req` values and reads `Res` values from one configured endpoint.
pub struct TypedClient<Req, Res, C = JsonConverter, T = UreqTransport> {
    config: ClientConfig,
    converter: C,
    executor: RequestExecutor<T>,
    _types: PhantomData<fn(&Req) -> Res>,
}

impl<Req, Res> TypedClient<Req, Res> {
    /// JSON bodies over a fresh `ureq` agent per call.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_parts(config, JsonConverter::new(), UreqTransport::new())
    }
}

impl<Req, Res, C, T> TypedClient<Req, Res, C, T>
where
    C: MessageConverter,
    T: Transport,
{
    pub fn with_parts(config: ClientConfig, converter: C, transport: T) -> Self {
        Self {
            config,
            converter,
            executor: RequestExecutor::with_transport(transport),
            _types: PhantomData,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Whether calls carry Basic Authentication.
    pub fn is_auth_enabled(&self) -> bool {
        self.config.credentials.is_some()
    }
}

impl<Req, Res, C, T> TypedClient<Req, Res, C, T>
where
    Res: DeserializeOwned,
    C: MessageConverter,
    T: Transport,
{
    pub fn get(&self) -> Result<TypedResponse<Res>, ClientError> {
        let spec = self.config.request_spec(HttpMethod::Get);
        let raw = self.executor.execute(&spec)?;
        self.typed(raw)
    }

    /// POST without an entity, for calls that have no request value.
    pub fn post_empty(&self) -> Result<TypedResponse<Res>, ClientError> {
        let spec = self.config.request_spec(HttpMethod::Post);
        let raw = self.executor.execute(&spec)?;
        self.typed(raw)
    }

    fn typed(&self, raw: RawResponse) -> Result<TypedResponse<Res>, ClientError> {
        let parsed = match raw.body() {
            Some(body) => Some(self.converter.deserialize(body)?),
            None => None,
        };
        Ok(TypedResponse { raw, parsed })
    }
}

impl<Req, Res, C, T> TypedClient<Req, Res, C, T>
where
    Req: Serialize,
    Res: DeserializeOwned,
    C: MessageConverter,
    T: Transport,
{
    pub fn post(&self, request: &Req) -> Result<TypedResponse<Res>, ClientError> {
        let body = self.converter.serialize(request)?;
        let mut spec = self.config.request_spec(HttpMethod::Post);
        spec.body = Some(body);
        let raw = self.executor.execute(&spec)?;
        self.typed(raw)
    }
}

impl<Req, Res, C: fmt::Debug, T: fmt::Debug> fmt::Debug for TypedClient<Req, Res, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedClient")
            .field("config", &self.config)
            .field("converter", &self.converter)
            .field("executor", &self.executor)
            .finish()
    }
}
