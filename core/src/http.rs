//! HTTP exchanges described as plain data.
//!
//! # Design
//! `SnappyClient` builds an `HttpRequest` value first, with the locator
//! resolved and every header attached, and only then hands it to a
//! [`Transport`](crate::transport::Transport). Keeping the request as data
//! makes the authentication and content-type rules testable without a
//! network.

use std::fmt;

use crate::response::ResponseStream;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read-only fetch.
    Get,
    /// Create or mutate; may carry a JSON or form body.
    Post,
    /// Remove; never carries a body.
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a transport hands back: the status and the unread body.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: ResponseStream,
}
