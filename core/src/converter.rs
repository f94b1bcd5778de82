//! Conversion between typed values and textual message bodies.
//!
//! # Design
//! A `TypedClient` is handed its converter at construction time; there is no
//! global default looked up at runtime. `JsonConverter` is the stock
//! implementation and uses `serde_json` with default settings.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SerializationError;

/// Turns typed values into message text and back.
pub trait MessageConverter {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SerializationError>;

    fn deserialize<T: DeserializeOwned>(&self, message: &str) -> Result<T, SerializationError>;
}

/// JSON via `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonConverter {
    pretty: bool,
}

impl JsonConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent serialized output. Parsing is unaffected.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl MessageConverter for JsonConverter {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SerializationError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|e| SerializationError::Serialize(e.into()))
    }

    fn deserialize<T: DeserializeOwned>(&self, message: &str) -> Result<T, SerializationError> {
        serde_json::from_str(message).map_err(|e| SerializationError::Deserialize(e.into()))
    }
}
