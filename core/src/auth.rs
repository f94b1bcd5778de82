//! HTTP Basic Authentication (RFC 7617).

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::Credentials;

pub const AUTHORIZATION: &str = "Authorization";

/// `Basic base64(username:password)`, standard alphabet with padding.
pub fn basic_auth_value(credentials: &Credentials) -> String {
    let token = STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
    format!("Basic {token}")
}
