//! Group accumulator.
//!
//! Runs the pipeline (simplify, validate, aggregate) for one HAR document
//! and appends the simplified capture and knowledge report to the histories
//! of the caller's group. State is process-local and never evicted; an
//! analyzer expects one caller at a time (see [`SharedAnalyzer`] otherwise).

mod group;
mod meta;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::{HarlensConfig, RuleConfig};
use crate::error::AnalyzeError;
use crate::har::{simplify, SimplifiedCapture};
use crate::knowledge::{build_knowledge, KnowledgeReport};
use crate::validate::{ContentValidator, HtmlEngine};

pub use group::Group;
pub use meta::PackageMetadata;

/// Analyzer shared between tasks; the mutex serializes `analyze` calls.
pub type SharedAnalyzer = Arc<tokio::sync::Mutex<HarAnalyzer>>;

/// Result of one `analyze` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub url: String,
    pub analyzed_data: SimplifiedCapture,
    pub knowledge_data: KnowledgeReport,
    pub meta: PackageMetadata,
}

/// Read-only view of everything an analyzer has accumulated.
#[derive(Debug, Serialize)]
pub struct AnalyzerSummary<'a> {
    pub meta: &'a PackageMetadata,
    pub rules: &'a RuleConfig,
    pub groups: &'a BTreeMap<String, Group>,
}

#[derive(Debug)]
pub struct HarAnalyzer {
    groups: BTreeMap<String, Group>,
    validator: ContentValidator,
    meta: PackageMetadata,
}

impl HarAnalyzer {
    pub fn new(validator: ContentValidator) -> Self {
        let meta = PackageMetadata::for_engine(validator.engine());
        Self {
            groups: BTreeMap::new(),
            validator,
            meta,
        }
    }

    /// Analyzer using the built-in HTML engine and the configured rules.
    pub fn from_config(cfg: &HarlensConfig) -> anyhow::Result<Self> {
        let rules = cfg.rule_config()?;
        let engine = Arc::new(HtmlEngine::from_config(&cfg.validation));
        let validator = ContentValidator::new(engine, rules, cfg.validation.max_concurrent)?;
        Ok(Self::new(validator))
    }

    /// Analyze one HAR document for `target_url` and record it under `group_id`.
    ///
    /// Fails only with [`AnalyzeError::InvalidInput`]; in that case the
    /// group's histories are left unchanged.
    pub async fn analyze(
        &mut self,
        target_url: &str,
        har: &Value,
        group_id: &str,
    ) -> Result<AnalysisOutcome, AnalyzeError> {
        let group = self.groups.entry(group_id.to_string()).or_default();

        let analyzed = simplify(har, target_url)?;
        let knowledge = build_knowledge(&analyzed, target_url, group_id, &self.validator).await;

        group.record(analyzed.clone(), knowledge.clone());
        tracing::debug!(
            url = target_url,
            group = group_id,
            runs = group.len(),
            buckets = knowledge.issues.len(),
            "analysis recorded"
        );

        Ok(AnalysisOutcome {
            url: target_url.to_string(),
            analyzed_data: analyzed,
            knowledge_data: knowledge,
            meta: self.meta.clone(),
        })
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id)
    }

    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    pub fn meta(&self) -> &PackageMetadata {
        &self.meta
    }

    pub fn rules(&self) -> &RuleConfig {
        self.validator.rules()
    }

    /// Snapshot of the whole accumulated state for reporting.
    pub fn summary(&self) -> AnalyzerSummary<'_> {
        AnalyzerSummary {
            meta: &self.meta,
            rules: self.validator.rules(),
            groups: &self.groups,
        }
    }

    pub fn into_shared(self) -> SharedAnalyzer {
        Arc::new(tokio::sync::Mutex::new(self))
    }
}
