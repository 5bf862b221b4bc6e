use super::BenchmarkEntry;
use crate::Result;
use crate::cards::CardId;
use crate::naming;
use crate::sources::CardSource;
use std::collections::BTreeMap;

/// Benchmark scores keyed by canonical card id.
///
/// Built in one go from a full snapshot of the benchmark site, so lookups never touch the network.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    entries: BTreeMap<CardId, BenchmarkEntry>,
}

impl BenchmarkTable {
    /// Build a table from entries named the benchmark site's way.
    ///
    /// If two site names map to the same canonical id, the later one wins.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = BenchmarkEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (naming::BENCHMARK.to_canonical(&entry.display_name), entry))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, card_id: &str) -> Option<&BenchmarkEntry> {
        self.entries.get(card_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CardSource for BenchmarkTable {
    type Entry = BenchmarkEntry;

    async fn lookup(&mut self, card_id: &CardId) -> Result<Option<BenchmarkEntry>> {
        Ok(self.get(card_id.as_str()).cloned())
    }

    fn enumerate(&self) -> Vec<(CardId, BenchmarkEntry)> {
        self.entries.iter().map(|(id, entry)| (id.clone(), entry.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, g3d_score: u64) -> BenchmarkEntry {
        BenchmarkEntry {
            display_name: name.to_string(),
            g3d_score,
            g2d_score: 500,
        }
    }

    #[test]
    fn site_names_become_canonical_ids() {
        let table = BenchmarkTable::from_entries([
            entry("GeForce RTX 3060", 17_000),
            entry("Radeon RX 580", 8_800),
            entry("Intel HD 620", 930),
            entry("Intel HD Graphics 4000", 450),
            entry("Quadro P1000", 4_100),
        ]);

        assert_eq!(table.len(), 5);
        assert_eq!(table.get("NVIDIA GeForce RTX 3060").unwrap().g3d_score, 17_000);
        assert_eq!(table.get("AMD Radeon RX 580").unwrap().display_name, "Radeon RX 580");
        assert_eq!(table.get("Intel HD Graphics 620").unwrap().g3d_score, 930);
        assert_eq!(table.get("Intel HD Graphics 4000").unwrap().g3d_score, 450);
        assert_eq!(table.get("Quadro P1000").unwrap().g3d_score, 4_100);
    }

    #[test]
    fn later_entries_win_on_id_collision() {
        let table = BenchmarkTable::from_entries([entry("GeForce GTX 1060", 1), entry("GeForce GTX 1060", 2)]);
        assert_eq!(table.get("NVIDIA GeForce GTX 1060").unwrap().g3d_score, 2);
    }

    #[tokio::test]
    async fn lookup_is_by_canonical_id() {
        let mut table = BenchmarkTable::from_entries([entry("GeForce RTX 3060", 17_000)]);

        assert!(table.lookup(&CardId::from("NVIDIA GeForce RTX 3060")).await.unwrap().is_some());
        assert!(table.lookup(&CardId::from("GeForce RTX 3060")).await.unwrap().is_none());

        let ids: Vec<_> = table.enumerate().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![CardId::from("NVIDIA GeForce RTX 3060")]);
    }
}
