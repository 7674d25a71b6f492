//! Response body rendering.
//!
//! A body that parses as JSON is pretty-printed one member per line with
//! two-space indentation, keys in the order the server sent them. Anything
//! else is passed through byte-for-byte. Rendering cannot fail.

use std::io::{self, Write};

use serde_json::Value;
use tracing::debug;

use crate::http::HttpResponse;

const INDENT: &str = "  ";

/// A rendered response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<'a> {
    Json(String),
    Raw(&'a [u8]),
}

impl Rendered<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Rendered::Json(text) => text.as_bytes(),
            Rendered::Raw(bytes) => bytes,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Rendered::Json(_))
    }
}

pub fn render_body(body: &[u8]) -> Rendered<'_> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Rendered::Json(pretty_json(&value)),
        Err(e) => {
            debug!(error = %e, "response body is not JSON; rendering raw");
            Rendered::Raw(body)
        }
    }
}

pub fn pretty_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        // Display on a string value yields the escaped, quoted form.
        Value::String(_) => out.push_str(&value.to_string()),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                indent(out, depth + 1);
                write_value(out, item, depth + 1);
            }
            out.push('\n');
            indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                indent(out, depth + 1);
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push_str(": ");
                write_value(out, item, depth + 1);
            }
            out.push('\n');
            indent(out, depth);
            out.push('}');
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Write the status line, a `Response body:` header, and the rendered body.
///
/// Raw bodies get a trailing newline only if they lack one.
pub fn write_report<W: Write>(out: &mut W, response: &HttpResponse) -> io::Result<()> {
    if response.status_message.is_empty() {
        writeln!(out, "Response status: {}", response.status)?;
    } else {
        writeln!(
            out,
            "Response status: {} {}",
            response.status, response.status_message
        )?;
    }
    writeln!(out, "Response body:")?;
    match render_body(&response.body) {
        Rendered::Json(text) => writeln!(out, "{text}")?,
        Rendered::Raw(bytes) => {
            out.write_all(bytes)?;
            if !bytes.ends_with(b"\n") {
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()
}
