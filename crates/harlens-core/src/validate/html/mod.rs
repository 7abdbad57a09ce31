//! Built-in HTML validation engine.
//!
//! A tag-level checker that understands optional end tags, void elements and
//! raw text elements. Rule ids follow html-validate naming so that
//! configurations written for it mostly carry over; per-rule options are
//! accepted in the config but not read.

mod rules;
mod scanner;

use crate::config::{RuleConfig, ValidationConfig};
use crate::error::EngineFault;

use super::engine::{EngineReport, EngineResult, ValidationEngine};

pub use rules::ALL_RULES;

pub const ENGINE_NAME: &str = "harlens-html";

#[derive(Debug, Clone)]
pub struct HtmlEngine {
    max_depth: usize,
}

impl HtmlEngine {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn from_config(cfg: &ValidationConfig) -> Self {
        Self::new(cfg.max_depth)
    }
}

impl Default for HtmlEngine {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl ValidationEngine for HtmlEngine {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn known_rules(&self) -> &[&'static str] {
        ALL_RULES
    }

    fn validate_string(
        &self,
        source: &str,
        rules: &RuleConfig,
    ) -> Result<EngineReport, EngineFault> {
        let tokens = scanner::scan(source);
        let messages = rules::check(&tokens, rules, self.max_depth)?;
        if messages.is_empty() {
            return Ok(EngineReport {
                valid: true,
                results: Vec::new(),
            });
        }
        let result = EngineResult::from_messages(messages);
        Ok(EngineReport {
            valid: result.error_count == 0,
            results: vec![result],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{preset, RuleLevel};

    fn run(source: &str) -> Vec<(String, u8, u32, u32)> {
        let rules = preset("recommended").unwrap();
        HtmlEngine::default()
            .validate_string(source, &rules)
            .unwrap()
            .messages()
            .map(|m| (m.rule_id.clone(), m.severity, m.line, m.column))
            .collect()
    }

    fn rule_ids(source: &str) -> Vec<String> {
        run(source).into_iter().map(|(rule, ..)| rule).collect()
    }

    const DOC: &str = "<!doctype html>";

    #[test]
    fn unclosed_div_reports_close_order_at_open_tag() {
        let rules = preset("standard").unwrap();
        let report = HtmlEngine::default().validate_string("<div>", &rules).unwrap();
        assert!(!report.valid);
        let messages: Vec<_> = report.messages().collect();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].rule_id, "close-order");
        assert_eq!(messages[0].severity, 2);
        assert_eq!((messages[0].line, messages[0].column), (1, 1));
        assert_eq!(messages[0].message, "Unclosed element '<div>'");
    }

    #[test]
    fn clean_document_has_no_results() {
        let rules = preset("recommended").unwrap();
        let report = HtmlEngine::default()
            .validate_string(
                "<!DOCTYPE html><html><head><title>t</title></head><body><p>a<p>b<ul><li>x<li>y</ul></body></html>",
                &rules,
            )
            .unwrap();
        assert!(report.valid);
        assert!(report.results.is_empty());
    }

    #[test]
    fn mismatched_and_stray_end_tags() {
        let ids = rule_ids(&format!("{DOC}<div><span></div></em>"));
        assert_eq!(ids, vec!["close-order", "close-order"]);
    }

    #[test]
    fn attribute_rules() {
        let src = format!(
            "{DOC}<div id=a class=x class=y style=\"color:red\"></div><img id=a src=x.png>"
        );
        let ids = rule_ids(&src);
        assert_eq!(
            ids,
            vec!["no-dup-attr", "no-inline-style", "no-dup-id", "wcag/h37"]
        );
    }

    #[test]
    fn inline_style_is_a_warning() {
        let found = run(&format!("{DOC}<b style=x></b>"));
        assert_eq!(found, vec![("no-inline-style".to_string(), 1, 1, 19)]);
    }

    #[test]
    fn void_and_deprecated_and_case() {
        let ids = rule_ids(&format!("{DOC}<br></br><center></center><DIV></DIV>"));
        assert_eq!(
            ids,
            vec!["void-content", "deprecated", "element-case", "element-case"]
        );
    }

    #[test]
    fn missing_doctype_only_when_enabled() {
        assert_eq!(rule_ids("<p>x</p>"), vec!["missing-doctype"]);
        let standard = preset("standard").unwrap();
        let report = HtmlEngine::default()
            .validate_string("<p>x</p>", &standard)
            .unwrap();
        assert!(report.results.is_empty());
    }

    #[test]
    fn disabled_rule_is_silent() {
        let rules = preset("standard")
            .unwrap()
            .with("close-order", RuleLevel::Off);
        let report = HtmlEngine::default().validate_string("<div>", &rules).unwrap();
        assert!(report.results.is_empty());
    }

    #[test]
    fn nesting_beyond_max_depth_is_a_fault() {
        let rules = preset("standard").unwrap();
        let deep = "<div>".repeat(5);
        let err = HtmlEngine::new(4).validate_string(&deep, &rules).unwrap_err();
        assert!(matches!(err, EngineFault::DepthExceeded { max_depth: 4, .. }));
    }
}
