//! Immutable client configuration.

use std::time::Duration;

use crate::auth::Credentials;

/// Production API root.
pub const DEFAULT_ENDPOINT_PREFIX: &str = "https://app.besnappy.com/api/v1";

/// Client version reported in the `User-Agent` header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent on every exchange.
pub fn default_user_agent() -> String {
    format!("Snappy rust client ({CLIENT_VERSION})")
}

/// Everything a `SnappyClient` needs to talk to the API.
///
/// Built once, before the client; the client never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint_prefix: String,
    pub credentials: Credentials,
    pub user_agent: String,
    /// Upper bound on a whole exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            endpoint_prefix: DEFAULT_ENDPOINT_PREFIX.to_string(),
            credentials,
            user_agent: default_user_agent(),
            timeout: None,
        }
    }

    pub fn with_endpoint_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.endpoint_prefix = prefix.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
