//! Issue, bucket and report types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::validate::{EngineMessage, SEVERITY_ERROR};

/// Test kind recorded on every bucket.
pub const TEST_KIND: &str = "html";
/// Category assigned to every issue.
pub const CATEGORY_STANDARD: &str = "standard";
/// Rule id of the bucket emitted when a capture has no HTML at all.
pub const NO_NETWORK_RULE: &str = "no-network";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    /// Enabled rule that produced no issues.
    Resolved,
}

impl Severity {
    /// Engine code 2 is an error; anything else is a warning.
    pub fn from_engine_code(code: u8) -> Self {
        if code == SEVERITY_ERROR {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    pub fn is_failing(self) -> bool {
        self != Severity::Resolved
    }
}

/// One diagnostic tied to the URL it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    pub url: String,
    pub rule: String,
    pub category: String,
    pub severity: Severity,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl RawIssue {
    pub fn from_message(url: &str, message: EngineMessage) -> Self {
        Self {
            url: url.to_string(),
            rule: message.rule_id,
            category: CATEGORY_STANDARD.to_string(),
            severity: Severity::from_engine_code(message.severity),
            text: message.message,
            line: message.line,
            column: message.column,
        }
    }
}

/// All issues sharing one rule id within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBucket {
    pub test: String,
    pub rule: String,
    pub category: String,
    pub severity: Severity,
    pub issues: Vec<RawIssue>,
}

impl RuleBucket {
    /// Bucket opened by its first observed issue.
    pub(crate) fn observed(first: RawIssue) -> Self {
        Self {
            test: TEST_KIND.to_string(),
            rule: first.rule.clone(),
            category: first.category.clone(),
            severity: first.severity,
            issues: vec![first],
        }
    }

    /// Empty bucket for an enabled rule with no issues.
    pub(crate) fn resolved(rule: &str) -> Self {
        Self {
            test: TEST_KIND.to_string(),
            rule: rule.to_string(),
            category: CATEGORY_STANDARD.to_string(),
            severity: Severity::Resolved,
            issues: Vec::new(),
        }
    }
}

/// Buckets keyed by rule id, in insertion order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueMap {
    buckets: Vec<RuleBucket>,
}

impl IssueMap {
    pub fn get(&self, rule: &str) -> Option<&RuleBucket> {
        self.buckets.iter().find(|b| b.rule == rule)
    }

    pub(crate) fn get_mut(&mut self, rule: &str) -> Option<&mut RuleBucket> {
        self.buckets.iter_mut().find(|b| b.rule == rule)
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.get(rule).is_some()
    }

    /// Append a bucket. The caller guarantees its rule id is not present yet.
    pub(crate) fn push(&mut self, bucket: RuleBucket) {
        debug_assert!(!self.contains(&bucket.rule), "duplicate bucket {}", bucket.rule);
        self.buckets.push(bucket);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleBucket> {
        self.buckets.iter()
    }

    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.rule.as_str())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Serialize for IssueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.rule, bucket)?;
        }
        map.end()
    }
}

/// Rule-indexed outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeReport {
    pub url: String,
    pub group: String,
    pub issues: IssueMap,
}

impl KnowledgeReport {
    /// Issues across all buckets, bucket by bucket.
    pub fn all_issues(&self) -> impl Iterator<Item = &RawIssue> {
        self.issues.iter().flat_map(|b| b.issues.iter())
    }

    /// Rules currently failing (error or warning).
    pub fn failing_rules(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(|b| b.severity.is_failing())
            .map(|b| b.rule.as_str())
    }
}
