//! Team-name canonicalization.
//!
//! The two source tables spell several nations differently ("USA" in the
//! World Cup matches export, "United States" in the results table), which
//! would silently split one team's statistics across two keys. Every stats
//! or head-to-head lookup goes through this table first; names without an
//! entry pass through unchanged.

use std::collections::HashMap;
use std::path::Path;

use crate::Result;

/// Known variants in the World Cup export, mapped to the spelling used by
/// the results table.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("USA", "United States"),
    ("Korea Republic", "South Korea"),
    ("Korea DPR", "North Korea"),
    ("IR Iran", "Iran"),
    ("China PR", "China"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("Germany FR", "Germany"),
];

#[derive(Clone, Debug, Default)]
pub struct TeamAliases {
    map: HashMap<String, String>,
}

impl TeamAliases {
    /// Empty table; every name resolves to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table preloaded with the variants known to appear in the datasets.
    pub fn with_defaults() -> Self {
        let map = DEFAULT_ALIASES
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();
        Self { map }
    }

    /// Extend the default table from a JSON file of `{"alias": "canonical"}`
    /// pairs. File entries win over the built-in defaults.
    pub fn with_defaults_and_file(path: &Path) -> Result<Self> {
        let mut table = Self::with_defaults();
        let bytes = std::fs::read(path)?;
        let extra: HashMap<String, String> = serde_json::from_slice(&bytes)
            .map_err(|e| crate::DataError::InvalidField {
                table: "aliases",
                row: 0,
                message: e.to_string(),
            })?;
        table.map.extend(extra);
        Ok(table)
    }

    pub fn insert(&mut self, alias: &str, canonical: &str) {
        self.map.insert(alias.to_string(), canonical.to_string());
    }

    /// Canonical name for `name`, or `name` itself when unmapped.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }
}
