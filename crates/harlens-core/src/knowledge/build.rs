//! Fold flat issues into a rule-keyed knowledge report.

use crate::config::RuleConfig;
use crate::har::SimplifiedCapture;
use crate::validate::ContentValidator;

use super::model::{
    IssueMap, KnowledgeReport, RawIssue, RuleBucket, Severity, CATEGORY_STANDARD,
    NO_NETWORK_RULE,
};

/// Report for a capture that contained no HTML: a single `no-network` warning.
pub fn no_network_report(target_url: &str, group_id: &str) -> KnowledgeReport {
    let issue = RawIssue {
        url: target_url.to_string(),
        rule: NO_NETWORK_RULE.to_string(),
        category: CATEGORY_STANDARD.to_string(),
        severity: Severity::Warning,
        text: "No HTML content found in network capture".to_string(),
        line: 1,
        column: 1,
    };
    let mut issues = IssueMap::default();
    issues.push(RuleBucket::observed(issue));
    KnowledgeReport {
        url: target_url.to_string(),
        group: group_id.to_string(),
        issues,
    }
}

/// Group issues by rule (first-seen order), then add a `resolved` bucket for
/// every enabled rule that was not observed, in configuration order.
pub fn aggregate(
    issues: Vec<RawIssue>,
    target_url: &str,
    group_id: &str,
    rules: &RuleConfig,
) -> KnowledgeReport {
    let mut map = IssueMap::default();
    for issue in issues {
        match map.get_mut(&issue.rule) {
            Some(bucket) => bucket.issues.push(issue),
            None => map.push(RuleBucket::observed(issue)),
        }
    }

    let observed = map.len();
    for rule in rules.enabled_rules() {
        if !map.contains(rule) {
            map.push(RuleBucket::resolved(rule));
        }
    }
    tracing::debug!(
        url = target_url,
        group = group_id,
        observed,
        resolved = map.len() - observed,
        "aggregated knowledge"
    );

    KnowledgeReport {
        url: target_url.to_string(),
        group: group_id.to_string(),
        issues: map,
    }
}

/// Validate the capture and build its knowledge report.
///
/// Resolved buckets come from the validator's own rule configuration. A
/// capture without HTML short-circuits to [`no_network_report`] and the
/// validator is not consulted.
pub async fn build_knowledge(
    capture: &SimplifiedCapture,
    target_url: &str,
    group_id: &str,
    validator: &ContentValidator,
) -> KnowledgeReport {
    if capture.is_empty() {
        return no_network_report(target_url, group_id);
    }
    let issues = validator.validate(capture).await;
    aggregate(issues, target_url, group_id, validator.rules())
}
