//! Rule configuration: an ordered mapping of rule id to `off` or an enabled level.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a rule is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    /// Numeric severity code reported by the engine for messages of this rule.
    pub fn severity_code(self) -> u8 {
        match self {
            RuleLevel::Off => 0,
            RuleLevel::Warn => 1,
            RuleLevel::Error => 2,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        }
    }

    fn parse_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(RuleLevel::Off),
            "warn" | "warning" => Some(RuleLevel::Warn),
            "error" => Some(RuleLevel::Error),
            _ => None,
        }
    }

    fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(RuleLevel::Off),
            1 => Some(RuleLevel::Warn),
            2 => Some(RuleLevel::Error),
            _ => None,
        }
    }
}

/// One rule's setting: a level plus optional engine-specific options.
///
/// Accepts `"off" | "warn" | "error"`, `0 | 1 | 2`, or `[level, options]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSetting")]
pub struct RuleSetting {
    pub level: RuleLevel,
    pub options: Option<serde_json::Value>,
}

impl RuleSetting {
    pub const OFF: RuleSetting = RuleSetting::level(RuleLevel::Off);

    pub const fn level(level: RuleLevel) -> Self {
        Self {
            level,
            options: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.level != RuleLevel::Off
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Name(String),
    Code(i64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Level(RawLevel),
    WithOptions(RawLevel, serde_json::Value),
}

impl TryFrom<RawLevel> for RuleLevel {
    type Error = String;

    fn try_from(raw: RawLevel) -> Result<Self, String> {
        match raw {
            RawLevel::Name(name) => {
                RuleLevel::parse_name(&name).ok_or_else(|| format!("invalid rule level '{name}'"))
            }
            RawLevel::Code(code) => {
                RuleLevel::from_code(code).ok_or_else(|| format!("invalid rule severity {code}"))
            }
        }
    }
}

impl TryFrom<RawSetting> for RuleSetting {
    type Error = String;

    fn try_from(raw: RawSetting) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawSetting::Level(level) => RuleSetting::level(level.try_into()?),
            RawSetting::WithOptions(level, options) => RuleSetting {
                level: level.try_into()?,
                options: Some(options),
            },
        })
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.options {
            None => serializer.serialize_str(self.level.as_str()),
            Some(options) => {
                let mut tup = serializer.serialize_tuple(2)?;
                tup.serialize_element(self.level.as_str())?;
                tup.serialize_element(options)?;
                tup.end()
            }
        }
    }
}

/// Ordered rule configuration. Order is significant: resolved buckets are
/// emitted in this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleConfig {
    entries: Vec<(String, RuleSetting)>,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a rule, replacing an existing entry in place or appending a new one.
    pub fn set(&mut self, rule: impl Into<String>, setting: RuleSetting) {
        let rule = rule.into();
        match self.entries.iter_mut().find(|(id, _)| *id == rule) {
            Some((_, existing)) => *existing = setting,
            None => self.entries.push((rule, setting)),
        }
    }

    /// Builder-style `set`.
    pub fn with(mut self, rule: impl Into<String>, level: RuleLevel) -> Self {
        self.set(rule, RuleSetting::level(level));
        self
    }

    /// Apply every entry of `other` on top of this configuration.
    pub fn merge(&mut self, other: &RuleConfig) {
        for (rule, setting) in &other.entries {
            self.set(rule.clone(), setting.clone());
        }
    }

    pub fn get(&self, rule: &str) -> Option<&RuleSetting> {
        self.entries
            .iter()
            .find(|(id, _)| id == rule)
            .map(|(_, setting)| setting)
    }

    pub fn is_enabled(&self, rule: &str) -> bool {
        self.get(rule).is_some_and(RuleSetting::is_enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.entries.iter().map(|(id, setting)| (id.as_str(), setting))
    }

    /// Enabled rule ids, in configuration order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, RuleLevel)> for RuleConfig {
    fn from_iter<I: IntoIterator<Item = (S, RuleLevel)>>(iter: I) -> Self {
        let mut cfg = RuleConfig::new();
        for (rule, level) in iter {
            cfg.set(rule, RuleSetting::level(level));
        }
        cfg
    }
}

impl Serialize for RuleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rule, setting) in &self.entries {
            map.serialize_entry(rule, setting)?;
        }
        map.end()
    }
}

struct RuleConfigVisitor;

impl<'de> Visitor<'de> for RuleConfigVisitor {
    type Value = RuleConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of rule id to rule setting")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut cfg = RuleConfig::new();
        while let Some((rule, setting)) = access.next_entry::<String, RuleSetting>()? {
            cfg.set(rule, setting);
        }
        Ok(cfg)
    }
}

impl<'de> Deserialize<'de> for RuleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RuleConfigVisitor)
    }
}
