//! Error types shared across the analysis pipeline.

use thiserror::Error;

/// Failure of one `analyze` call (or of building the pipeline).
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The HAR document has no iterable exchange list.
    #[error("invalid HAR input: {0}")]
    InvalidInput(String),
    /// The rule configuration names a rule the engine does not implement.
    #[error("unknown rule '{rule}' for validation engine {engine}")]
    UnknownRule { rule: String, engine: String },
}

/// Engine-level failure while validating one document.
///
/// Never aborts an analysis: the content validator logs it and treats the
/// affected unit as having no issues.
#[derive(Debug, Error)]
pub enum EngineFault {
    #[error("element nesting exceeds maximum depth {max_depth} at line {line}")]
    DepthExceeded { max_depth: usize, line: u32 },
    #[error("validation engine failed: {0}")]
    Internal(String),
}
