use super::ArchitectureEntry;
use crate::Result;
use crate::sources::{Lookup, cache_doc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

const LOG_TARGET: &str = "      arch";

/// Everything ever learned from the architecture database, keyed by the database's own names.
///
/// Entries never expire. Names the database confirmed it doesn't know are remembered too,
/// so they are never queried again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchitectureCache {
    cards: BTreeMap<String, ArchitectureEntry>,
    unknowns: BTreeSet<String>,

    #[serde(skip)]
    path: Option<PathBuf>,
}

impl ArchitectureCache {
    /// An empty cache that lives only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the cache persisted at `path`.
    ///
    /// A missing or unreadable file, or `ignore_existing`, starts from an empty cache that
    /// will be written to `path` on the next change.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, ignore_existing: bool) -> Self {
        let path = path.into();

        let mut cache = if ignore_existing {
            Self::default()
        } else {
            match cache_doc::load::<Self>(&path, "architecture cache") {
                Ok(cache) => {
                    log::info!(
                        target: LOG_TARGET,
                        "Read architecture cache, {} cards & {} unknowns",
                        cache.cards.len(),
                        cache.unknowns.len()
                    );
                    cache
                }
                Err(e) => {
                    log::debug!(target: LOG_TARGET, "Starting with an empty architecture cache: {e}");
                    Self::default()
                }
            }
        };

        cache.path = Some(path);
        cache
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Lookup<&ArchitectureEntry> {
        if self.unknowns.contains(name) {
            Lookup::KnownAbsent
        } else {
            self.cards.get(name).map_or(Lookup::Unknown, Lookup::Hit)
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: ArchitectureEntry) {
        let name = name.into();
        let _ = self.unknowns.remove(&name);
        let _ = self.cards.insert(name, entry);
    }

    pub fn insert_unknown(&mut self, name: impl Into<String>) {
        let name = name.into();
        let _ = self.cards.remove(&name);
        let _ = self.unknowns.insert(name);
    }

    pub fn cards(&self) -> impl Iterator<Item = (&str, &ArchitectureEntry)> {
        self.cards.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.unknowns.len()
    }

    /// Write the cache to its backing file. A no-op for in-memory caches.
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        cache_doc::save(self, path)?;
        log::debug!(
            target: LOG_TARGET,
            "Wrote architecture cache, {} cards & {} unknowns",
            self.cards.len(),
            self.unknowns.len()
        );
        Ok(())
    }
}
