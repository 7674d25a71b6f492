//! Request builder and sender.
//!
//! # Design
//! `RequestClient` holds a transport and a list of default headers and
//! carries no state between calls. `build_*` methods turn a URL and params
//! into an `HttpRequest` without I/O; `send` hands that request to the
//! transport and blocks until the response is in.

use serde_json::{Map, Value};
use tracing::debug;
use ureq::http::{HeaderName, HeaderValue};

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::target::Target;
use crate::transport::{Transport, UreqTransport};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Synchronous client that issues one request per `send` call.
#[derive(Debug, Clone, Default)]
pub struct RequestClient<T = UreqTransport> {
    transport: T,
    headers: Vec<(String, String)>,
}

impl RequestClient<UreqTransport> {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport)
    }
}

impl<T: Transport> RequestClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            headers: Vec::new(),
        }
    }

    /// Add a header sent with every request built by this client.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::Header {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        HeaderValue::from_str(value).map_err(|e| ClientError::Header {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        self.headers.push((name.to_string(), value.to_string()));
        Ok(self)
    }

    /// GET when `params` is empty, POST with a JSON body otherwise.
    pub fn build(&self, url: &str, params: &[(String, String)]) -> Result<HttpRequest, ClientError> {
        if params.is_empty() {
            self.build_get(url)
        } else {
            self.build_post(url, params)
        }
    }

    pub fn build_get(&self, url: &str) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            target: Target::parse(url)?,
            headers: self.headers.clone(),
            body: None,
        })
    }

    /// POST with `content-type: application/json`. The body is omitted when
    /// `params` is empty.
    pub fn build_post(&self, url: &str, params: &[(String, String)]) -> Result<HttpRequest, ClientError> {
        let target = Target::parse(url)?;
        let body = json_body(params)?;

        let mut headers = self.headers.clone();
        if !headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("content-type")) {
            headers.insert(0, ("content-type".to_string(), JSON_CONTENT_TYPE.to_string()));
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            target,
            headers,
            body,
        })
    }

    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let response = self.transport.execute(request)?;
        debug!(
            status = response.status,
            message = %response.status_message,
            "request completed"
        );
        Ok(response)
    }

    /// Build and send in one step.
    pub fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<HttpResponse, ClientError> {
        let request = self.build(url, params)?;
        self.send(&request)
    }
}

/// Serialize params into a JSON object, keeping first-seen key order. A
/// repeated key keeps its position and takes the later value.
fn json_body(params: &[(String, String)]) -> Result<Option<Vec<u8>>, ClientError> {
    if params.is_empty() {
        return Ok(None);
    }
    let object: Map<String, Value> = params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let body = serde_json::to_vec(&object).map_err(|e| ClientError::Body(e.to_string()))?;
    Ok(Some(body))
}
