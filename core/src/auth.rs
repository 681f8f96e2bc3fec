//! HTTP Basic credentials attached to every exchange.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Password sent alongside an API key. The API ignores it, but Basic auth
/// requires something after the colon.
pub const API_KEY_PASSWORD: &str = "x";

/// Credentials a client authenticates with.
///
/// `Debug` never prints secrets.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key used as the Basic-auth username.
    ApiKey(String),
    /// Explicit username and password.
    UsernamePassword { username: String, password: String },
}

impl Credentials {
    pub fn api_key(key: impl Into<String>) -> Self {
        Credentials::ApiKey(key.into())
    }

    pub fn username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::UsernamePassword {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Credentials::ApiKey(key) => key,
            Credentials::UsernamePassword { username, .. } => username,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            Credentials::ApiKey(_) => API_KEY_PASSWORD,
            Credentials::UsernamePassword { password, .. } => password,
        }
    }

    /// Value for the `Authorization` header: `Basic base64(user:password)`.
    pub fn authorization_header(&self) -> String {
        let pair = format!("{}:{}", self.username(), self.password());
        format!("Basic {}", STANDARD.encode(pair))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credentials::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
