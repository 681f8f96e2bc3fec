//! The network seam: executes one `HttpRequest` and returns the raw outcome.
//!
//! Status interpretation is not a transport concern. `execute` returns every
//! status as data; `SnappyClient` decides what counts as success.

use std::time::Duration;

use ureq::config::RedirectAuthHeaders;
use ureq::{Agent, RequestBuilder};

use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::ResponseStream;

/// Performs a single HTTP exchange.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport backed by `ureq`.
///
/// Each exchange gets its own agent, so no connection outlives the call
/// that opened it (or the `ResponseStream` it returned). Redirects are
/// followed, and `Authorization` is resent only when the target stays on
/// the same host.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport {
    timeout: Option<Duration>,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn agent(&self) -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(self.timeout)
            .redirect_auth_headers(RedirectAuthHeaders::SameHost)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let agent = self.agent();
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let response = match request.method {
            HttpMethod::Get => with_headers(agent.get(url), headers).call()?,
            HttpMethod::Delete => with_headers(agent.delete(url), headers).call()?,
            HttpMethod::Post => {
                let builder = with_headers(agent.post(url), headers);
                match request.body.as_deref() {
                    Some(body) => builder.send(body)?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let reader = response.into_body().into_reader();
        Ok(HttpResponse {
            status,
            body: ResponseStream::new(reader),
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
