use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

/// Fixed JSON document served by `GET /json`. Keys are deliberately not in
/// alphabetical order.
pub const JSON_DOCUMENT: &str =
    r#"{"name":"reqprobe","version":1,"tags":["http","json"],"owner":{"login":"octo","admin":false},"extra":null}"#;

/// Body served by `GET /text`.
pub const TEXT_DOCUMENT: &str = "plain text, not JSON\n  indented line\n";

pub fn app() -> Router {
    Router::new()
        .route("/json", get(json_document))
        .route("/text", get(text_document))
        .route("/echo", post(echo_body))
        .route("/headers", get(echo_headers))
        .route("/status/{code}", get(status_code).post(status_code))
        .route("/redirect", get(redirect))
        .route("/empty", get(empty))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn json_document() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], JSON_DOCUMENT)
}

async fn text_document() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], TEXT_DOCUMENT)
}

/// Echo the request body back unchanged, with the caller's content type.
async fn echo_body(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    ([(header::CONTENT_TYPE, content_type)], body)
}

/// Request headers as a JSON object, names lowercased.
async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let object: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();
    Json(Value::Object(object))
}

async fn status_code(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(serde_json::json!({ "status": code }))))
}

async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/json")], "moved")
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_document_is_valid_json() {
        let value: Value = serde_json::from_str(JSON_DOCUMENT).unwrap();
        assert_eq!(value["name"], "reqprobe");
        assert_eq!(value["tags"][1], "json");
    }

    #[test]
    fn json_document_key_order_is_not_sorted() {
        let value: Value = serde_json::from_str(JSON_DOCUMENT).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["name", "version", "tags", "owner", "extra"]);
    }

    #[test]
    fn text_document_is_not_json() {
        assert!(serde_json::from_str::<Value>(TEXT_DOCUMENT).is_err());
    }
}
