//! `harlens diff <BEFORE> <AFTER> --url <URL>` – rule changes between two captures.

use anyhow::{Context, Result};
use harlens_core::analyzer::HarAnalyzer;
use harlens_core::config::HarlensConfig;
use harlens_core::har;
use harlens_core::knowledge::{diff_reports, ChangeKind};
use std::path::Path;

const DIFF_GROUP: &str = "diff";

pub async fn run_diff(cfg: &HarlensConfig, before: &Path, after: &Path, url: &str) -> Result<()> {
    let mut analyzer = HarAnalyzer::from_config(cfg)?;
    let mut reports = Vec::with_capacity(2);
    for path in [before, after] {
        let doc = har::load_har(path)?;
        let outcome = analyzer
            .analyze(url, &doc, DIFF_GROUP)
            .await
            .with_context(|| format!("analyze HAR: {}", path.display()))?;
        reports.push(outcome.knowledge_data);
    }

    let changes = diff_reports(&reports[0], &reports[1]);
    println!("{:<20} {:<10} {:>6} {:>6}", "RULE", "CHANGE", "BEFORE", "AFTER");
    for change in changes.iter().filter(|c| c.kind != ChangeKind::Unchanged) {
        println!(
            "{:<20} {:<10} {:>6} {:>6}",
            change.rule,
            format!("{:?}", change.kind).to_lowercase(),
            change.before,
            change.after
        );
    }
    let unchanged = changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Unchanged)
        .count();
    println!("{unchanged} rule(s) unchanged");
    Ok(())
}
