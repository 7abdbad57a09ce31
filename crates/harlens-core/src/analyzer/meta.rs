use serde::Serialize;
use std::collections::BTreeMap;

use crate::validate::ValidationEngine;

/// Static package metadata echoed into every analysis outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    /// Versioned collaborators, e.g. the validation engine.
    pub dependencies: BTreeMap<String, String>,
}

impl PackageMetadata {
    pub fn for_engine(engine: &dyn ValidationEngine) -> Self {
        let mut dependencies = BTreeMap::new();
        dependencies.insert(engine.name().to_string(), engine.version().to_string());
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dependencies,
        }
    }
}
