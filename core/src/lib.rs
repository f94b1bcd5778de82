//! Generic-typed HTTP client convenience layer.
//!
//! # Overview
//! A `RequestExecutor` validates a `RequestSpec`, builds a GET or POST
//! request (optional Basic Authentication, caller headers, a default
//! `Content-Type`, one timeout for every phase), sends it through a
//! `Transport` and classifies the response: `[100, 400)` is success,
//! anything else is a `CallFailure`. A `TypedClient` layers a
//! `MessageConverter` on top so callers send and receive typed values.
//!
//! # Design
//! - Request building and response classification are pure functions; only
//!   the `Transport` does I/O. `UreqTransport` opens a fresh agent per call.
//! - One `RequestSpec` / `ClientConfig` with defaults describes a call.
//! - Converters are injected, never looked up.
//! - Responses are immutable values.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use serde::Deserialize;
//! use typed_http::{ClientConfig, TypedClient};
//!
//! #[derive(Deserialize)]
//! struct Echo {
//!     args: HashMap<String, String>,
//! }
//!
//! let client: TypedClient<(), Echo> =
//!     TypedClient::new(ClientConfig::new("http://localhost:3000/get?a=1"));
//! let response = client.get()?;
//! assert_eq!(response.parsed().unwrap().args["a"], "1");
//! # Ok::<(), typed_http::ClientError>(())
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod converter;
pub mod encoding;
pub mod error;
pub mod executor;
pub mod http;
pub mod transport;

pub use client::{TypedClient, TypedResponse};
pub use config::{ClientConfig, Credentials, RequestSpec};
pub use converter::{JsonConverter, MessageConverter};
pub use encoding::Charset;
pub use error::{CallError, CallFailure, ClientError, SerializationError, TransportError};
pub use executor::{is_success, RawResponse, RequestExecutor};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
