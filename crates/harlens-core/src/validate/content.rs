//! Run every HTML unit of a capture through the engine and flatten the issues.
//!
//! Keeps up to `max_concurrent` units validating at once on the blocking
//! pool; when one finishes, the next unit is started until all are done.
//! Results are stitched back together in unit order, not completion order.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::RuleConfig;
use crate::error::AnalyzeError;
use crate::har::{CaptureUnit, SimplifiedCapture};
use crate::knowledge::RawIssue;

use super::engine::ValidationEngine;

/// Validates simplified captures with one engine and one rule configuration.
#[derive(Clone)]
pub struct ContentValidator {
    engine: Arc<dyn ValidationEngine>,
    rules: Arc<RuleConfig>,
    max_concurrent: usize,
}

impl std::fmt::Debug for ContentValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentValidator")
            .field("engine", &self.engine.name())
            .field("rules", &self.rules)
            .field("max_concurrent", &self.max_concurrent)
            .finish()
    }
}

/// Enabled rules that carry options the engine will not read.
pub(crate) fn ignored_options<'a>(
    engine: &dyn ValidationEngine,
    rules: &'a RuleConfig,
) -> Vec<&'a str> {
    if engine.reads_rule_options() {
        return Vec::new();
    }
    rules
        .iter()
        .filter(|(_, setting)| setting.is_enabled() && setting.options.is_some())
        .map(|(rule, _)| rule)
        .collect()
}

impl ContentValidator {
    /// Fails if an enabled rule is not implemented by `engine`.
    pub fn new(
        engine: Arc<dyn ValidationEngine>,
        rules: RuleConfig,
        max_concurrent: usize,
    ) -> Result<Self, AnalyzeError> {
        let known = engine.known_rules();
        if let Some(rule) = rules
            .enabled_rules()
            .find(|rule| !known.iter().any(|k| k == rule))
        {
            return Err(AnalyzeError::UnknownRule {
                rule: rule.to_string(),
                engine: engine.name().to_string(),
            });
        }
        for rule in ignored_options(engine.as_ref(), &rules) {
            tracing::debug!(
                rule,
                engine = engine.name(),
                "rule options given but the engine ignores them"
            );
        }
        Ok(Self {
            engine,
            rules: Arc::new(rules),
            max_concurrent: max_concurrent.max(1),
        })
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn engine(&self) -> &dyn ValidationEngine {
        self.engine.as_ref()
    }

    /// Validate every unit and return all issues, unit by unit in capture order.
    ///
    /// Never fails: an engine fault or a panicked task for one unit is logged
    /// and that unit contributes no issues.
    pub async fn validate(&self, capture: &SimplifiedCapture) -> Vec<RawIssue> {
        let units = &capture.htmls;
        let mut per_unit: Vec<Vec<RawIssue>> = vec![Vec::new(); units.len()];
        let mut join_set = JoinSet::new();
        let mut next = 0;

        loop {
            while join_set.len() < self.max_concurrent && next < units.len() {
                let slot = next;
                let unit = units[slot].clone();
                let engine = Arc::clone(&self.engine);
                let rules = Arc::clone(&self.rules);
                join_set.spawn_blocking(move || {
                    (slot, unit_issues(engine.as_ref(), &rules, &unit))
                });
                next += 1;
            }

            let Some(res) = join_set.join_next().await else {
                break;
            };
            match res {
                Ok((slot, issues)) => per_unit[slot] = issues,
                Err(err) => {
                    tracing::warn!("validation task failed, treating unit as clean: {err}");
                }
            }
        }

        per_unit.into_iter().flatten().collect()
    }
}

fn unit_issues(
    engine: &dyn ValidationEngine,
    rules: &RuleConfig,
    unit: &CaptureUnit,
) -> Vec<RawIssue> {
    match engine.validate_string(&unit.content, rules) {
        Ok(report) => report
            .results
            .into_iter()
            .flat_map(|result| result.messages)
            .map(|message| RawIssue::from_message(&unit.url, message))
            .collect(),
        Err(fault) => {
            tracing::warn!(
                url = %unit.url,
                index = unit.index,
                engine = engine.name(),
                "validation engine fault, treating unit as clean: {fault}"
            );
            Vec::new()
        }
    }
}
