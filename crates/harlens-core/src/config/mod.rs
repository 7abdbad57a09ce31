//! Configuration loaded from `~/.config/harlens/config.toml`.

mod rules;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use rules::{RuleConfig, RuleLevel, RuleSetting};

/// Name of the preset used when nothing else is configured.
pub const DEFAULT_PRESET: &str = "standard";

/// Rule preset by name, in the order its rules are reported.
pub fn preset(name: &str) -> Option<RuleConfig> {
    use RuleLevel::{Error, Warn};

    let standard = [
        ("close-order", Error),
        ("void-content", Error),
        ("no-dup-attr", Error),
        ("no-dup-id", Error),
        ("deprecated", Error),
        ("wcag/h37", Error),
        ("no-inline-style", Warn),
    ];
    match name {
        "standard" => Some(standard.into_iter().collect()),
        "recommended" => Some(
            standard
                .into_iter()
                .chain([("missing-doctype", Error), ("element-case", Error)])
                .collect(),
        ),
        _ => None,
    }
}

/// Content validator tuning (optional `[validation]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum validation tasks in flight during one analysis.
    pub max_concurrent: usize,
    /// Element nesting depth above which the built-in engine gives up on a document.
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            max_depth: 512,
        }
    }
}

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarlensConfig {
    /// Presets applied in order before `rules`.
    pub extends: Vec<String>,
    /// Per-rule overrides; an existing rule keeps its position, new rules are appended.
    pub rules: RuleConfig,
    pub validation: ValidationConfig,
}

impl Default for HarlensConfig {
    fn default() -> Self {
        Self {
            extends: vec![DEFAULT_PRESET.to_string()],
            rules: RuleConfig::new(),
            validation: ValidationConfig::default(),
        }
    }
}

impl HarlensConfig {
    /// Effective rule configuration: presets in `extends` order, then `rules`.
    pub fn rule_config(&self) -> Result<RuleConfig> {
        let mut effective = RuleConfig::new();
        for name in &self.extends {
            let preset =
                preset(name).with_context(|| format!("unknown rule preset '{name}'"))?;
            effective.merge(&preset);
        }
        effective.merge(&self.rules);
        Ok(effective)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harlens")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<HarlensConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: HarlensConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HarlensConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HarlensConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
