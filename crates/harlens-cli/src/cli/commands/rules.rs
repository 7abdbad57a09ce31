//! `harlens rules` – print the effective rule configuration.

use anyhow::Result;
use harlens_core::config::HarlensConfig;

pub fn run_rules(cfg: &HarlensConfig) -> Result<()> {
    let rules = cfg.rule_config()?;
    if rules.is_empty() {
        println!("No rules configured.");
        return Ok(());
    }
    println!("{:<20} {}", "RULE", "LEVEL");
    for (rule, setting) in rules.iter() {
        println!(
            "{:<20} {}",
            rule,
            format!("{:?}", setting.level).to_lowercase()
        );
    }
    Ok(())
}
