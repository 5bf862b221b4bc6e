use super::{ArchitectureCache, ArchitectureEntry, ArchitectureFetch, GraphQlFetcher};
use crate::Result;
use crate::cards::CardId;
use crate::naming::{self, NameMapper};
use crate::sources::{CardSource, Lookup};
use ohno::EnrichableExt;

const LOG_TARGET: &str = "      arch";

/// Architecture source: a persistent cache in front of the architecture database.
///
/// Every lookup goes through the cache first. A miss queries the database once and the answer,
/// positive or negative, is cached and persisted before returning.
#[derive(Debug)]
pub struct ArchitectureDb<F = GraphQlFetcher> {
    cache: ArchitectureCache,
    fetcher: F,
    mapper: NameMapper,
    fetch_count: usize,
}

impl<F: ArchitectureFetch> ArchitectureDb<F> {
    #[must_use]
    pub const fn new(cache: ArchitectureCache, fetcher: F) -> Self {
        Self {
            cache,
            fetcher,
            mapper: naming::ARCHITECTURE,
            fetch_count: 0,
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &ArchitectureCache {
        &self.cache
    }

    /// Number of database queries made by this instance.
    #[must_use]
    pub const fn fetch_count(&self) -> usize {
        self.fetch_count
    }
}

impl<F: ArchitectureFetch> CardSource for ArchitectureDb<F> {
    type Entry = ArchitectureEntry;

    async fn lookup(&mut self, card_id: &CardId) -> Result<Option<ArchitectureEntry>> {
        let name = self.mapper.to_source(card_id);

        match self.cache.lookup(&name) {
            Lookup::Hit(entry) => return Ok(Some(entry.clone())),
            Lookup::KnownAbsent => return Ok(None),
            Lookup::Unknown => {}
        }

        self.fetch_count += 1;
        let fetched = self
            .fetcher
            .fetch(&name)
            .await
            .map_err(|e| e.enrich_with(|| format!("looking up '{name}' (card '{card_id}') in the architecture database")))?;

        if let Some(entry) = &fetched {
            log::info!(target: LOG_TARGET, "Found '{name}': {entry}");
            self.cache.insert(name, entry.clone());
        } else {
            log::info!(target: LOG_TARGET, "Architecture database has no card named '{name}'");
            self.cache.insert_unknown(name);
        }

        self.cache.persist()?;
        Ok(fetched)
    }

    fn enumerate(&self) -> Vec<(CardId, ArchitectureEntry)> {
        self.cache
            .cards()
            .map(|(name, entry)| (self.mapper.to_canonical(name), entry.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct StubFetcher {
        known: Vec<ArchitectureEntry>,
        calls: Cell<usize>,
    }

    impl StubFetcher {
        fn new(names: &[&str]) -> Self {
            Self {
                known: names.iter().map(|name| entry(name)).collect(),
                calls: Cell::new(0),
            }
        }
    }

    impl ArchitectureFetch for StubFetcher {
        async fn fetch(&self, name: &str) -> Result<Option<ArchitectureEntry>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.known.iter().find(|e| e.display_name == name).cloned())
        }
    }

    struct FailingFetcher;

    impl ArchitectureFetch for FailingFetcher {
        async fn fetch(&self, _name: &str) -> Result<Option<ArchitectureEntry>> {
            Err(ohno::app_err!("connection refused"))
        }
    }

    fn entry(name: &str) -> ArchitectureEntry {
        ArchitectureEntry {
            display_name: name.to_string(),
            compute_unit_count: 36,
            alu_count: 2304,
            single_precision_tflops: 6.17,
            base_freq_hz: 1_257_000_000,
            turbo_freq_hz: None,
            memory_bus_bits: 256,
            memory_freq_hz: 2_000_000_000.0,
            memory_bytes: 8 * 1024 * 1024 * 1024,
            memory_type: "GDDR5".to_string(),
            release_date: "2017-04-18".to_string(),
            vendor: "AMD".to_string(),
            asic_name: "Polaris 20".to_string(),
        }
    }

    #[tokio::test]
    async fn lookup_translates_the_id_before_querying() {
        let mut db = ArchitectureDb::new(ArchitectureCache::in_memory(), StubFetcher::new(&["RX 580"]));

        let found = db.lookup(&CardId::from("AMD Radeon RX 580")).await.unwrap();

        assert_eq!(found.map(|e| e.display_name), Some("RX 580".to_string()));
        assert!(matches!(db.cache().lookup("RX 580"), Lookup::Hit(_)));
    }

    #[tokio::test]
    async fn cached_answers_are_not_refetched() {
        let mut db = ArchitectureDb::new(ArchitectureCache::in_memory(), StubFetcher::new(&["RX 580"]));
        let hit = CardId::from("AMD Radeon RX 580");
        let miss = CardId::from("AMD Radeon RX 9999");

        for _ in 0..3 {
            assert!(db.lookup(&hit).await.unwrap().is_some());
            assert!(db.lookup(&miss).await.unwrap().is_none());
        }

        assert_eq!(db.fetch_count(), 2);
        assert_eq!(db.fetcher.calls.get(), 2);
        assert_eq!(db.cache().lookup("RX 9999"), Lookup::KnownAbsent);
    }

    #[tokio::test]
    async fn known_absent_short_circuits() {
        let mut cache = ArchitectureCache::in_memory();
        cache.insert_unknown("GTX 1060");
        let mut db = ArchitectureDb::new(cache, StubFetcher::new(&["GTX 1060"]));

        assert!(db.lookup(&CardId::from("NVIDIA GeForce GTX 1060")).await.unwrap().is_none());
        assert_eq!(db.fetch_count(), 0);
    }

    #[tokio::test]
    async fn fetch_errors_propagate_and_cache_nothing() {
        let mut db = ArchitectureDb::new(ArchitectureCache::in_memory(), FailingFetcher);

        let err = db.lookup(&CardId::from("AMD Radeon RX 580")).await.unwrap_err();

        assert!(err.to_string().contains("connection refused"));
        assert_eq!(db.cache().lookup("RX 580"), Lookup::Unknown);
    }

    #[test]
    fn enumerate_yields_canonical_ids_of_cached_cards() {
        let mut cache = ArchitectureCache::in_memory();
        cache.insert("RX 580", entry("RX 580"));
        cache.insert("RTX 2070 (Reference)", entry("RTX 2070 (Reference)"));
        cache.insert("RTX 4070 Super", entry("RTX 4070 Super"));
        cache.insert_unknown("GTX 1060");
        let db = ArchitectureDb::new(cache, FailingFetcher);

        let ids: Vec<_> = db.enumerate().into_iter().map(|(id, _)| id).collect();

        assert_eq!(
            ids,
            vec![
                CardId::from("NVIDIA GeForce RTX 2070"),
                CardId::from("NVIDIA GeForce RTX 4070 SUPER"),
                CardId::from("AMD Radeon RX 580"),
            ]
        );
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn answers_are_persisted_after_each_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("architecture.json");

        let mut db = ArchitectureDb::new(ArchitectureCache::open(&path, false), StubFetcher::new(&["RX 580"]));
        let _ = db.lookup(&CardId::from("AMD Radeon RX 580")).await.unwrap();
        let _ = db.lookup(&CardId::from("AMD Radeon RX 9999")).await.unwrap();

        let reopened = ArchitectureCache::open(&path, false);
        assert!(matches!(reopened.lookup("RX 580"), Lookup::Hit(_)));
        assert_eq!(reopened.lookup("RX 9999"), Lookup::KnownAbsent);
    }
}
