//! Network I/O for a built request.
//!
//! # Design
//! `Transport` is the only place bytes leave the process. `RequestClient`
//! never touches a socket itself, so tests can substitute an in-memory
//! implementation. `UreqTransport` opens one connection per call (TLS for
//! `https`) and returns non-2xx statuses as ordinary responses.

use tracing::debug;
use ureq::Agent;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Response bodies larger than this fail with `ClientError::Network`.
pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Executes one request and blocks until the whole response is read.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// Blocking transport backed by a fresh `ureq` agent per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    /// Redirects are not followed so the caller sees the status the server
    /// actually sent.
    fn agent() -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let agent = Self::agent();
        let url = request.target.as_str();
        debug!(method = %request.method, url, "sending request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| map_error(url, e))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| map_error(url, e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        // ureq does not expose the reason phrase the server sent; use the
        // canonical one for the code, empty when there is none.
        Ok(HttpResponse {
            status: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// Everything except a URI the HTTP layer refuses is a transport failure.
fn map_error(url: &str, err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::BadUri(reason) => ClientError::Url {
            url: url.to_string(),
            reason,
        },
        other => ClientError::Network {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}
