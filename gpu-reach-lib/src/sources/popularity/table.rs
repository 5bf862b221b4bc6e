use crate::Result;
use crate::cards::CardId;
use crate::sources::CardSource;
use ohno::app_err;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LOG_TARGET: &str = "popularity";

/// One survey category: a card and the fraction of surveyed machines reporting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityEntry {
    pub display_name: String,
    pub share: f64,
}

/// The live popularity table, keyed by canonical card id.
///
/// Survey names are canonical ids, so no name translation happens here.
#[derive(Debug, Clone, Default)]
pub struct PopularityTable {
    entries: BTreeMap<CardId, PopularityEntry>,
}

impl PopularityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. The display name doubles as the card id.
    pub fn insert(&mut self, display_name: impl Into<String>, share: f64) {
        let display_name = display_name.into();
        let _ = self.entries.insert(CardId::new(display_name.clone()), PopularityEntry { display_name, share });
    }

    #[must_use]
    pub fn get(&self, card_id: &str) -> Option<&PopularityEntry> {
        self.entries.get(card_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &PopularityEntry)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all shares.
    #[must_use]
    pub fn total_share(&self) -> f64 {
        self.entries.values().map(|entry| entry.share).sum()
    }

    /// Remove a category and rescale every remaining share by `1 / (1 - removed_share)`.
    ///
    /// This takes the category out of the universe: shares that summed to 1 before the
    /// removal sum to 1 afterwards.
    ///
    /// # Errors
    ///
    /// Fails if the category doesn't exist, if its share is not a finite number, or if it
    /// holds the entire share so nothing would be left to rescale. The table is untouched
    /// on failure.
    pub fn remove_category(&mut self, name: &str) -> Result<PopularityEntry> {
        let removed_share = self
            .entries
            .get(name)
            .ok_or_else(|| app_err!("category '{name}' does not exist in the popularity table"))?
            .share;

        if !removed_share.is_finite() {
            return Err(app_err!("cannot remove category '{name}': its share is not a finite number ({removed_share})"));
        }

        let remaining = 1.0 - removed_share;
        if remaining <= 0.0 {
            return Err(app_err!(
                "cannot remove category '{name}': it accounts for the whole survey (share {removed_share})"
            ));
        }

        let removed = self
            .entries
            .remove(name)
            .ok_or_else(|| app_err!("category '{name}' does not exist in the popularity table"))?;

        let scale = 1.0 / remaining;
        for entry in self.entries.values_mut() {
            entry.share *= scale;
        }

        log::info!(
            target: LOG_TARGET,
            "Removed category '{name}' ({:.2}%), rescaled {} remaining entries by {scale:.4}",
            removed_share * 100.0,
            self.entries.len()
        );

        Ok(removed)
    }
}

impl FromIterator<(String, f64)> for PopularityTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, share) in iter {
            table.insert(name, share);
        }
        table
    }
}

impl CardSource for PopularityTable {
    type Entry = PopularityEntry;

    async fn lookup(&mut self, card_id: &CardId) -> Result<Option<PopularityEntry>> {
        Ok(self.get(card_id.as_str()).cloned())
    }

    fn enumerate(&self) -> Vec<(CardId, PopularityEntry)> {
        self.entries.iter().map(|(id, entry)| (id.clone(), entry.clone())).collect()
    }
}
