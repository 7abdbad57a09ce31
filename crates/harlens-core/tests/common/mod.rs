//! HAR fixtures for integration tests.

use serde_json::{json, Value};

/// One exchange; `size` and `status` as written into the HAR.
pub fn exchange(url: &str, mime: &str, text: &str, size: i64, status: i64) -> Value {
    json!({
        "request": { "method": "GET", "url": url, "headers": [] },
        "response": {
            "status": status,
            "headers": [],
            "content": { "size": size, "mimeType": mime, "text": text }
        }
    })
}

/// A well-formed 200 response with a body.
pub fn ok(url: &str, mime: &str, text: &str) -> Value {
    exchange(url, mime, text, text.len() as i64, 200)
}

/// Wrap exchanges as a HAR 1.2 `log` document.
pub fn har(entries: Vec<Value>) -> Value {
    json!({
        "log": {
            "version": "1.2",
            "creator": { "name": "fixture", "version": "0" },
            "entries": entries
        }
    })
}
