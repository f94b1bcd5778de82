//! Error types for the executor, the message converters and the typed client.
//!
//! # Design
//! The executor reports the specific kind of failure (`CallError`): bad
//! arguments caught before any I/O, transport failures, and well-formed
//! responses outside the success range. The converter has its own
//! `SerializationError`. `TypedClient` folds both into a single
//! `ClientError` so callers handle one type while still reaching the
//! original cause through `source()`.

use std::collections::HashMap;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The transport could not complete the exchange (connect, I/O, timeout).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A response whose status fell outside `[100, 400)`.
///
/// Carries everything the server sent back. Headers are always captured
/// here, whether or not the caller asked for them on success.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CallFailure {
    message: String,
    status: u16,
    reason: String,
    body: String,
    headers: HashMap<String, String>,
}

impl CallFailure {
    pub(crate) fn new(
        status: u16,
        reason: String,
        body: String,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            message: format!("{}{status}", crate::config::FAILURE_MESSAGE_PREFIX),
            status,
            reason,
            body,
            headers,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Response body, or the `"NoContent"` sentinel if there was no entity.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Errors returned by `RequestExecutor`.
#[derive(Debug, Error)]
pub enum CallError {
    /// A required argument was empty or unusable. Raised before any I/O.
    #[error("required field `{0}` is missing or invalid")]
    InvalidArgument(&'static str),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status outside the success range.
    #[error(transparent)]
    Failure(#[from] CallFailure),
}

impl CallError {
    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::Failure(failure) => Some(failure.status()),
            _ => None,
        }
    }
}

/// Errors returned by a `MessageConverter`.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The value could not be written as a message.
    #[error("serialization failed: {0}")]
    Serialize(#[source] BoxError),

    /// The message could not be read into the requested type.
    #[error("deserialization failed: {0}")]
    Deserialize(#[source] BoxError),
}

/// The single error type surfaced by `TypedClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http call failed: {0}")]
    Call(#[from] CallError),

    #[error("message conversion failed: {0}")]
    Conversion(#[from] SerializationError),
}

impl ClientError {
    /// The failed response, if the server answered outside the success range.
    pub fn failure(&self) -> Option<&CallFailure> {
        match self {
            ClientError::Call(CallError::Failure(failure)) => Some(failure),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.failure().map(CallFailure::status)
    }
}
