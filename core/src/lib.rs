//! Synchronous single-shot HTTP request helper.
//!
//! # Overview
//! Parses a URL into a `Target`, builds an `HttpRequest` (GET, or POST with a
//! JSON body made from key/value params), sends it through a `Transport`, and
//! renders the `HttpResponse` body as pretty-printed JSON or raw bytes.
//!
//! # Design
//! - `RequestClient` holds a transport and default headers, nothing else.
//!   Building and sending are separate calls, so request construction stays
//!   deterministic and testable without a network.
//! - `Transport` is the I/O seam. `UreqTransport` is the default; tests swap
//!   in fakes.
//! - Rendering never fails: a body that does not parse as JSON is shown as-is.

pub mod client;
pub mod error;
pub mod http;
pub mod render;
pub mod target;
pub mod transport;

pub use client::RequestClient;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{pretty_json, render_body, write_report, Rendered};
pub use target::{Scheme, Target};
pub use transport::{Transport, UreqTransport};
