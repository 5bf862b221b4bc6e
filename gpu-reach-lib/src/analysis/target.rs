use crate::Result;
use crate::cards::CardId;
use ohno::{EnrichableExt, IntoAppError, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A named hardware configuration whose GPU sets the performance bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfiguration {
    pub name: String,
    pub reference_card_id: CardId,
}

impl TargetConfiguration {
    #[must_use]
    pub fn new(name: impl Into<String>, reference_card_id: impl Into<CardId>) -> Self {
        Self {
            name: name.into(),
            reference_card_id: reference_card_id.into(),
        }
    }
}

/// Load the target list from a JSON file mapping configuration names to reference card ids.
pub fn load_targets(path: impl AsRef<Path>) -> Result<Vec<TargetConfiguration>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading target configurations from '{}'", path.display()))?;
    parse_targets(&text).map_err(|e| e.enrich_with(|| format!("loading target configurations from '{}'", path.display())))
}

/// Parse a JSON object `{ "<configuration name>": "<reference card id>", ... }`.
///
/// Configurations come back ordered by name. Empty names or ids are rejected.
pub fn parse_targets(text: &str) -> Result<Vec<TargetConfiguration>> {
    let map: BTreeMap<String, String> = serde_json::from_str(text).into_app_err("invalid target configuration list")?;

    let mut targets = Vec::with_capacity(map.len());
    for (name, card_id) in map {
        if name.trim().is_empty() {
            bail!("target configuration names must not be empty");
        }
        if card_id.trim().is_empty() {
            bail!("target configuration '{name}' has an empty reference card");
        }
        targets.push(TargetConfiguration::new(name, card_id));
    }

    Ok(targets)
}
