//! End-to-end: HAR document → simplified capture → knowledge report → group history.

mod common;

use std::io::Write;

use common::{exchange, har, ok};
use harlens_core::analyzer::HarAnalyzer;
use harlens_core::config::{preset, HarlensConfig, RuleConfig, RuleLevel};
use harlens_core::error::AnalyzeError;
use harlens_core::har::{load_har, simplify};
use harlens_core::knowledge::{diff_reports, ChangeKind, Severity, NO_NETWORK_RULE};
use tempfile::NamedTempFile;

const SITE: &str = "https://www.example.org/";

#[tokio::test]
async fn unclosed_div_page() {
    let doc = har(vec![exchange(SITE, "text/html", "<div>", 5, 200)]);
    let mut analyzer = HarAnalyzer::from_config(&HarlensConfig::default()).unwrap();
    let outcome = analyzer.analyze(SITE, &doc, "desktop").await.unwrap();

    assert_eq!(outcome.analyzed_data.htmls.len(), 1);
    let report = &outcome.knowledge_data;
    let close_order = report.issues.get("close-order").expect("close-order bucket");
    assert_eq!(close_order.issues.len(), 1);
    assert_eq!(close_order.issues[0].url, SITE);
    assert_eq!((close_order.issues[0].line, close_order.issues[0].column), (1, 1));

    let standard = preset("standard").unwrap();
    for rule in standard.enabled_rules().filter(|r| *r != "close-order") {
        let bucket = report.issues.get(rule).expect("resolved bucket");
        assert_eq!(bucket.severity, Severity::Resolved);
        assert!(bucket.issues.is_empty());
    }
    assert_eq!(report.issues.len(), standard.enabled_rules().count());
}

#[tokio::test]
async fn captures_without_html_report_no_network() {
    let mut analyzer = HarAnalyzer::from_config(&HarlensConfig::default()).unwrap();
    let cases = vec![
        har(vec![ok(SITE, "application/json", "{\"a\":1}")]),
        har(vec![]),
        har(vec![exchange(SITE, "text/html", "<div>", 0, 200)]),
        har(vec![exchange(SITE, "text/html", "<div>", 5, 0)]),
    ];
    for doc in &cases {
        let outcome = analyzer.analyze(SITE, doc, "empty").await.unwrap();
        let report = &outcome.knowledge_data;
        assert_eq!(report.issues.len(), 1);
        let bucket = report.issues.get(NO_NETWORK_RULE).unwrap();
        assert_eq!(bucket.severity, Severity::Warning);
    }
    assert_eq!(analyzer.group("empty").unwrap().len(), cases.len());
}

#[tokio::test]
async fn multi_page_capture_orders_buckets_by_first_sighting() {
    let doc = har(vec![
        ok("https://www.example.org/style.css", "text/css", "body{}"),
        ok(SITE, "text/html; charset=utf-8", "<p style=\"x\">a</p><img src=a.png>"),
        ok("https://www.example.org/frame", "text/html", "<span></div>"),
    ]);
    let capture = simplify(&doc, SITE).unwrap();
    let indexes: Vec<usize> = capture.htmls.iter().map(|u| u.index).collect();
    assert_eq!(indexes, vec![2, 3]);

    let mut analyzer = HarAnalyzer::from_config(&HarlensConfig::default()).unwrap();
    let outcome = analyzer.analyze(SITE, &doc, "g").await.unwrap();
    let rules: Vec<&str> = outcome.knowledge_data.issues.rules().collect();
    assert_eq!(
        rules,
        vec![
            "no-inline-style",
            "wcag/h37",
            "close-order",
            "void-content",
            "no-dup-attr",
            "no-dup-id",
            "deprecated",
        ]
    );
    let inline = outcome.knowledge_data.issues.get("no-inline-style").unwrap();
    assert_eq!(inline.severity, Severity::Warning);
    let close_order = outcome.knowledge_data.issues.get("close-order").unwrap();
    assert_eq!(close_order.issues.len(), 2);
    assert!(close_order
        .issues
        .iter()
        .all(|i| i.url == "https://www.example.org/frame"));
}

#[tokio::test]
async fn disabled_rules_never_appear_as_resolved() {
    let cfg = HarlensConfig {
        rules: RuleConfig::new()
            .with("deprecated", RuleLevel::Off)
            .with("no-inline-style", RuleLevel::Off),
        ..HarlensConfig::default()
    };
    let mut analyzer = HarAnalyzer::from_config(&cfg).unwrap();
    let doc = har(vec![ok(SITE, "text/html", "<center style=x></center>")]);
    let outcome = analyzer.analyze(SITE, &doc, "g").await.unwrap();
    assert!(!outcome.knowledge_data.issues.contains("deprecated"));
    assert!(!outcome.knowledge_data.issues.contains("no-inline-style"));
    assert!(outcome
        .knowledge_data
        .issues
        .iter()
        .all(|b| b.severity == Severity::Resolved));
}

#[tokio::test]
async fn invalid_har_is_reported_to_caller() {
    let mut analyzer = HarAnalyzer::from_config(&HarlensConfig::default()).unwrap();
    let err = analyzer
        .analyze(SITE, &serde_json::json!({ "log": { "entries": "nope" } }), "g")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidInput(_)));
    assert!(analyzer.group("g").map_or(true, |g| g.is_empty()));
}

#[tokio::test]
async fn har_file_roundtrip_and_fix_detection() {
    let before = har(vec![ok(SITE, "text/html", "<div><img src=a.png>")]);
    let after = har(vec![ok(SITE, "text/html", "<div><img src=a.png alt=\"\"></div>")]);

    let mut files = Vec::new();
    for doc in [&before, &after] {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(serde_json::to_string(doc).unwrap().as_bytes())
            .unwrap();
        f.flush().unwrap();
        files.push(f);
    }

    let mut analyzer = HarAnalyzer::from_config(&HarlensConfig::default()).unwrap();
    for f in &files {
        let doc = load_har(f.path()).unwrap();
        analyzer.analyze(SITE, &doc, "trend").await.unwrap();
    }

    let group = analyzer.group("trend").unwrap();
    assert_eq!(group.len(), 2);
    let changes = diff_reports(&group.knowledge_data[0], &group.knowledge_data[1]);
    let fixed: Vec<&str> = changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Fixed)
        .map(|c| c.rule.as_str())
        .collect();
    assert_eq!(fixed, vec!["close-order", "wcag/h37"]);
    assert!(changes
        .iter()
        .all(|c| matches!(c.kind, ChangeKind::Fixed | ChangeKind::Unchanged)));
}
