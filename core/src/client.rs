//! Authenticated, blocking client for the Snappy API.
//!
//! # Design
//! `SnappyClient` holds an immutable `ClientConfig` and a shared transport.
//! It carries no per-call state. Every call goes through the same pipeline:
//! `build_request` resolves the locator and attaches `User-Agent`,
//! `Authorization`, and (for bodies) `Content-Type`; the transport performs
//! the exchange; `send` accepts exactly 200 and turns anything else into
//! `ApiError::Remote`. The typed helpers (`get_json`, `post_form`, ...) are
//! what the resource methods in `endpoints` are built from.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::auth::Credentials;
use crate::body::Body;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest};
use crate::locator::{Locator, Params};
use crate::response::ResponseStream;
use crate::transport::{Transport, UreqTransport};

/// The only status the API uses for success.
const STATUS_OK: u16 = 200;

/// Client for the Snappy API. Cheap to clone and safe to share across
/// threads.
#[derive(Clone)]
pub struct SnappyClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl SnappyClient {
    pub fn new(config: ClientConfig) -> Self {
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Self { config, transport }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ClientConfig::new(Credentials::api_key(api_key)))
    }

    pub fn with_username_and_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(ClientConfig::new(Credentials::username_password(username, password)))
    }

    /// Point the client at a different API root, e.g. a local stand-in.
    pub fn with_endpoint_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.endpoint_prefix = prefix.into();
        self
    }

    /// Replace the network layer.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Describe the exchange for `method` on `locator` without sending it.
    pub fn build_request(&self, method: HttpMethod, locator: &Locator, body: Option<Body>) -> HttpRequest {
        let mut headers = vec![
            ("User-Agent".to_string(), self.config.user_agent.clone()),
            (
                "Authorization".to_string(),
                self.config.credentials.authorization_header(),
            ),
        ];
        if let Some(body) = &body {
            headers.push(("Content-Type".to_string(), body.content_type().to_string()));
        }

        HttpRequest {
            method,
            url: locator.resolve(&self.config.endpoint_prefix),
            headers,
            body: body.map(Body::into_bytes),
        }
    }

    /// Perform one exchange and return the unread body of a 200 response.
    pub fn send(&self, method: HttpMethod, locator: &Locator, body: Option<Body>) -> Result<ResponseStream> {
        let request = self.build_request(method, locator, body);
        debug!(%method, path = locator.path(), "dispatching request");

        let response = self.transport.execute(request)?;
        debug!(%method, path = locator.path(), status = response.status, "received response");

        if response.status != STATUS_OK {
            // Dropping the response releases its body unread.
            return Err(ApiError::Remote);
        }
        Ok(response.body)
    }

    /// GET `locator` and decode the JSON body into `T`.
    pub fn get_json<T: DeserializeOwned>(&self, locator: &Locator) -> Result<T> {
        self.send(HttpMethod::Get, locator, None)?.decode()
    }

    /// GET `locator` and hand back the raw body. The caller owns the stream.
    pub fn get_stream(&self, locator: &Locator) -> Result<ResponseStream> {
        self.send(HttpMethod::Get, locator, None)
    }

    /// POST `payload` as JSON.
    pub fn post_json<P: Serialize + ?Sized>(&self, locator: &Locator, payload: &P) -> Result<()> {
        let body = Body::json(payload)?;
        self.send(HttpMethod::Post, locator, Some(body)).map(drop)
    }

    /// POST `fields` form-encoded.
    pub fn post_form(&self, locator: &Locator, fields: &Params) -> Result<()> {
        self.send(HttpMethod::Post, locator, Some(Body::form(fields)))
            .map(drop)
    }

    /// POST with no body and no `Content-Type`.
    pub fn post_empty(&self, locator: &Locator) -> Result<()> {
        self.send(HttpMethod::Post, locator, None).map(drop)
    }

    pub fn delete(&self, locator: &Locator) -> Result<()> {
        self.send(HttpMethod::Delete, locator, None).map(drop)
    }
}

impl std::fmt::Debug for SnappyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnappyClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
