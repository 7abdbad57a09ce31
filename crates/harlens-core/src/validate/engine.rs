//! Boundary to the markup-validation engine.

use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;
use crate::error::EngineFault;

/// Engine severity code that maps to an error; every other code is a warning.
pub const SEVERITY_ERROR: u8 = 2;

/// One diagnostic as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMessage {
    pub rule_id: String,
    pub severity: u8,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// Messages for one validated source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResult {
    pub messages: Vec<EngineMessage>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl EngineResult {
    pub fn from_messages(messages: Vec<EngineMessage>) -> Self {
        let error_count = messages
            .iter()
            .filter(|m| m.severity == SEVERITY_ERROR)
            .count();
        let warning_count = messages.len() - error_count;
        Self {
            messages,
            error_count,
            warning_count,
        }
    }
}

/// Output of one engine invocation: zero or more result groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineReport {
    pub valid: bool,
    pub results: Vec<EngineResult>,
}

impl EngineReport {
    pub fn messages(&self) -> impl Iterator<Item = &EngineMessage> {
        self.results.iter().flat_map(|r| r.messages.iter())
    }
}

/// A markup-validation engine.
///
/// Implementations are called from tokio's blocking pool, one call per HTML
/// body, possibly several at once.
pub trait ValidationEngine: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Rule ids this engine can evaluate.
    fn known_rules(&self) -> &[&'static str];

    /// Whether `[level, options]` rule options change what this engine reports.
    fn reads_rule_options(&self) -> bool {
        false
    }

    /// Validate one document with the given rule configuration.
    fn validate_string(&self, source: &str, rules: &RuleConfig)
        -> Result<EngineReport, EngineFault>;
}
