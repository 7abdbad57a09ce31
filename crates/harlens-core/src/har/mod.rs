//! HAR (HTTP Archive) capture simplifier.
//!
//! Reads HAR documents and keeps, in exchange order, only the responses that
//! carry an HTML body worth validating.

mod parse;
mod simplify;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

pub use simplify::{simplify, CaptureUnit, SimplifiedCapture};

/// Read and parse a HAR file from disk. Shape is checked later by [`simplify`].
pub fn load_har(path: &Path) -> Result<Value> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;
    Ok(har)
}
