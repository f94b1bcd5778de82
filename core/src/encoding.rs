//! Charsets for request and response bodies.

use crate::error::CallError;

/// A supported body charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl Charset {
    /// Resolve a charset name. Empty or missing names fall back to UTF-8.
    pub fn resolve(name: Option<&str>) -> Result<Self, CallError> {
        let name = match name.map(str::trim) {
            None | Some("") => return Ok(Charset::Utf8),
            Some(name) => name.to_ascii_lowercase(),
        };
        match name.as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "latin1" | "latin-1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(CallError::InvalidArgument("encoding")),
        }
    }

    /// Characters the charset cannot represent become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Charset::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }

    /// Malformed input becomes U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { '\u{FFFD}' })
                .collect(),
        }
    }
}
