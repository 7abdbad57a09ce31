//! Project a HAR document down to the HTML bodies worth validating.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalyzeError;

use super::parse::{HarContent, HarEntry};

/// Substring of a response mimetype that marks it as HTML.
const HTML_MIME_MARKER: &str = "html";

/// One exchange with a renderable HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureUnit {
    pub url: String,
    pub content: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// 1-based position among qualifying exchanges (HTML or not).
    pub index: usize,
}

/// Validation-relevant projection of one HAR document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedCapture {
    pub url: String,
    pub htmls: Vec<CaptureUnit>,
}

impl SimplifiedCapture {
    pub fn is_empty(&self) -> bool {
        self.htmls.is_empty()
    }
}

/// Content of a response that has a body, a type, a positive size, and a status.
fn qualifying_content(entry: &HarEntry) -> Option<(&str, &str)> {
    let response = entry.response.as_ref()?;
    if !response.has_status() {
        return None;
    }
    let content: &HarContent = response.content.as_ref()?;
    let text = content.text.as_deref().filter(|t| !t.is_empty())?;
    let mime_type = content.mime_type.as_deref().filter(|m| !m.is_empty())?;
    if !content.size().is_some_and(|s| s > 0.0) {
        return None;
    }
    Some((text, mime_type))
}

/// Build the simplified capture for `url` from a HAR document.
///
/// The document may be the bare archive body (`{"entries": [...]}`) or wrapped
/// under `log`. Exchanges that fail qualification are skipped without consuming
/// an index; qualifying non-HTML exchanges consume an index but are not kept.
pub fn simplify(har: &Value, url: &str) -> Result<SimplifiedCapture, AnalyzeError> {
    let root = har.get("log").unwrap_or(har);
    let entries = root
        .get("entries")
        .ok_or_else(|| AnalyzeError::InvalidInput("HAR has no 'entries'".to_string()))?
        .as_array()
        .ok_or_else(|| AnalyzeError::InvalidInput("HAR 'entries' is not an array".to_string()))?;

    let mut htmls = Vec::new();
    let mut index = 1;
    for (position, raw) in entries.iter().enumerate() {
        let entry = match HarEntry::deserialize(raw) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(position, "skipping malformed HAR entry: {err}");
                continue;
            }
        };
        let Some((text, mime_type)) = qualifying_content(&entry) else {
            continue;
        };
        if mime_type.contains(HTML_MIME_MARKER) {
            htmls.push(CaptureUnit {
                url: entry.request.url.clone(),
                content: text.to_string(),
                mime_type: mime_type.to_string(),
                index,
            });
        }
        index += 1;
    }

    tracing::debug!(url, kept = htmls.len(), qualifying = index - 1, "simplified HAR");

    Ok(SimplifiedCapture {
        url: url.to_string(),
        htmls,
    })
}
