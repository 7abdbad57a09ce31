//! `harlens analyze <HAR>... --url <URL>` – analyze captures into one group.

use anyhow::{Context, Result};
use harlens_core::analyzer::HarAnalyzer;
use harlens_core::config::HarlensConfig;
use harlens_core::har;
use std::path::Path;

pub async fn run_analyze(
    cfg: &HarlensConfig,
    paths: &[String],
    url: &str,
    group: &str,
    summary: bool,
) -> Result<()> {
    let mut analyzer = HarAnalyzer::from_config(cfg)?;
    for path in paths {
        let doc = har::load_har(Path::new(path))?;
        let outcome = analyzer
            .analyze(url, &doc, group)
            .await
            .with_context(|| format!("analyze HAR: {path}"))?;
        tracing::info!(
            path = %path,
            group,
            failing = outcome.knowledge_data.failing_rules().count(),
            "analyzed capture"
        );
        if !summary {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    if summary {
        println!("{}", serde_json::to_string_pretty(&analyzer.summary())?);
    }
    Ok(())
}
