//! Rule-level comparison of two knowledge reports.

use serde::Serialize;

use super::model::{KnowledgeReport, RuleBucket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Failing before, resolved or absent after.
    Fixed,
    /// Resolved or absent before, failing after.
    Regressed,
    /// Failing in both, with a different number of issues.
    Changed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleChange {
    pub rule: String,
    pub kind: ChangeKind,
    pub before: usize,
    pub after: usize,
}

fn failing(bucket: Option<&RuleBucket>) -> Option<usize> {
    bucket
        .filter(|b| b.severity.is_failing())
        .map(|b| b.issues.len())
}

fn classify(before: Option<&RuleBucket>, after: Option<&RuleBucket>) -> ChangeKind {
    match (failing(before), failing(after)) {
        (Some(_), None) => ChangeKind::Fixed,
        (None, Some(_)) => ChangeKind::Regressed,
        (Some(b), Some(a)) if a != b => ChangeKind::Changed,
        _ => ChangeKind::Unchanged,
    }
}

/// Compare every rule of `after` (in its order), then rules only in `before`.
pub fn diff_reports(before: &KnowledgeReport, after: &KnowledgeReport) -> Vec<RuleChange> {
    let after_rules = after.issues.rules();
    let only_before = before
        .issues
        .rules()
        .filter(|rule| !after.issues.contains(rule));

    after_rules
        .chain(only_before)
        .map(|rule| {
            let b = before.issues.get(rule);
            let a = after.issues.get(rule);
            RuleChange {
                rule: rule.to_string(),
                kind: classify(b, a),
                before: b.map_or(0, |b| b.issues.len()),
                after: a.map_or(0, |a| a.issues.len()),
            }
        })
        .collect()
}
