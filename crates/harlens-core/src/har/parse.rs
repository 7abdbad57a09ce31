//! Lenient HAR 1.2 structures: only the fields the simplifier reads.
//!
//! Every field is optional so that one odd exchange never rejects the whole
//! archive; qualification happens in `simplify`.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HarEntry {
    pub request: HarRequest,
    pub response: Option<HarResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HarRequest {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HarResponse {
    /// Kept raw: exporters write `200`, `200.0` or `"200"`.
    pub status: Option<Value>,
    pub content: Option<HarContent>,
}

impl HarResponse {
    /// A status counts as present unless it is null, false, zero or empty.
    pub fn has_status(&self) -> bool {
        match &self.status {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HarContent {
    pub size: Option<Value>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub text: Option<String>,
}

impl HarContent {
    /// Body size in bytes, accepting numeric strings as well as numbers.
    pub fn size(&self) -> Option<f64> {
        match self.size.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
