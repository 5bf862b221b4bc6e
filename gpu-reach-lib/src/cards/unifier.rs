use super::{CardId, CardTable, Progress, UnifiedCard};
use crate::Result;
use crate::sources::CardSource;
use crate::sources::architecture::ArchitectureEntry;
use crate::sources::benchmark::BenchmarkEntry;
use crate::sources::popularity::PopularityEntry;
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

const LOG_TARGET: &str = "   unifier";

/// Merge the three sources into one record per card.
///
/// Cards come from two passes:
/// 1. Every card the popularity source lists, with its architecture and benchmark entries looked up.
/// 2. Every card the benchmark source lists that pass 1 didn't produce, with its popularity and
///    architecture entries looked up.
///
/// Architecture data alone never creates a card, since a card without a score can't take part
/// in eligibility. Any fetch error aborts the merge.
pub async fn unify<P, A, B>(popularity: &mut P, architecture: &mut A, benchmarks: &mut B, progress: &dyn Progress) -> Result<CardTable>
where
    P: CardSource<Entry = PopularityEntry>,
    A: CardSource<Entry = ArchitectureEntry>,
    B: CardSource<Entry = BenchmarkEntry>,
{
    let start = Instant::now();
    let popular = popularity.enumerate();
    let benchmarked = benchmarks.enumerate();

    let total = (popular.len() + benchmarked.len()) as u64;
    let processed = Arc::new(AtomicU64::new(0));
    progress.set_phase("Unifying");
    progress.set_determinate({
        let processed = Arc::clone(&processed);
        Box::new(move || {
            let current = processed.load(Ordering::Relaxed);
            (total, current, format!("{current}/{total} cards"))
        })
    });

    let mut cards: BTreeMap<CardId, UnifiedCard> = BTreeMap::new();

    for (id, popularity_entry) in popular {
        let architecture_entry = architecture.lookup(&id).await?;
        let benchmark_entry = benchmarks.lookup(&id).await?;

        if let Some(card) = UnifiedCard::new(id.clone(), Some(popularity_entry), architecture_entry, benchmark_entry) {
            let _ = cards.insert(id, card);
        }
        let _ = processed.fetch_add(1, Ordering::Relaxed);
    }

    let from_popularity = cards.len();

    for (id, benchmark_entry) in benchmarked {
        if !cards.contains_key(&id) {
            let popularity_entry = popularity.lookup(&id).await?;
            let architecture_entry = architecture.lookup(&id).await?;

            if let Some(card) = UnifiedCard::new(id.clone(), popularity_entry, architecture_entry, Some(benchmark_entry)) {
                let _ = cards.insert(id, card);
            }
        }
        let _ = processed.fetch_add(1, Ordering::Relaxed);
    }

    log::info!(
        target: LOG_TARGET,
        "Unified {} cards ({from_popularity} from the survey, {} more from benchmarks) in {:.3}s",
        cards.len(),
        cards.len() - from_popularity,
        start.elapsed().as_secs_f64()
    );

    Ok(CardTable::from_cards(cards.into_values()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::NoProgress;
    use crate::sources::benchmark::BenchmarkTable;
    use crate::sources::popularity::PopularityTable;

    /// Architecture source over a fixed map, counting lookups.
    #[derive(Default)]
    struct FixedArchitecture {
        entries: BTreeMap<CardId, ArchitectureEntry>,
        lookups: Vec<CardId>,
    }

    impl CardSource for FixedArchitecture {
        type Entry = ArchitectureEntry;

        async fn lookup(&mut self, card_id: &CardId) -> Result<Option<ArchitectureEntry>> {
            self.lookups.push(card_id.clone());
            Ok(self.entries.get(card_id).cloned())
        }

        fn enumerate(&self) -> Vec<(CardId, ArchitectureEntry)> {
            self.entries.iter().map(|(id, entry)| (id.clone(), entry.clone())).collect()
        }
    }

    struct FailingArchitecture;

    impl CardSource for FailingArchitecture {
        type Entry = ArchitectureEntry;

        async fn lookup(&mut self, _card_id: &CardId) -> Result<Option<ArchitectureEntry>> {
            Err(ohno::app_err!("architecture database unreachable"))
        }

        fn enumerate(&self) -> Vec<(CardId, ArchitectureEntry)> {
            Vec::new()
        }
    }

    fn arch(name: &str) -> ArchitectureEntry {
        ArchitectureEntry {
            display_name: name.to_string(),
            compute_unit_count: 1,
            alu_count: 1,
            single_precision_tflops: 1.0,
            base_freq_hz: 1,
            turbo_freq_hz: None,
            memory_bus_bits: 64,
            memory_freq_hz: 1.0,
            memory_bytes: 1024,
            memory_type: "DDR4".to_string(),
            release_date: "2020-01-01".to_string(),
            vendor: "v".to_string(),
            asic_name: "a".to_string(),
        }
    }

    fn bench(name: &str, g3d_score: u64) -> BenchmarkEntry {
        BenchmarkEntry {
            display_name: name.to_string(),
            g3d_score,
            g2d_score: 0,
        }
    }

    fn popularity() -> PopularityTable {
        [("NVIDIA GeForce RTX 3060", 0.6), ("AMD Radeon RX 580", 0.4)]
            .into_iter()
            .map(|(name, share)| (name.to_string(), share))
            .collect()
    }

    fn benchmarks() -> BenchmarkTable {
        BenchmarkTable::from_entries([bench("GeForce RTX 3060", 17_000), bench("GeForce RTX 4090", 38_000)])
    }

    fn architecture() -> FixedArchitecture {
        let mut entries = BTreeMap::new();
        let _ = entries.insert(CardId::from("NVIDIA GeForce RTX 3060"), arch("RTX 3060"));
        let _ = entries.insert(CardId::from("NVIDIA GeForce RTX 4090"), arch("RTX 4090"));
        let _ = entries.insert(CardId::from("NVIDIA GeForce GTX 480"), arch("GTX 480"));
        FixedArchitecture { entries, lookups: Vec::new() }
    }

    #[tokio::test]
    async fn every_surveyed_or_benchmarked_card_appears_once() {
        let mut architecture = architecture();

        let table = unify(&mut popularity(), &mut architecture, &mut benchmarks(), &NoProgress).await.unwrap();

        let ids: Vec<_> = table.iter().map(|card| card.id().as_str()).collect();
        assert_eq!(ids, vec!["AMD Radeon RX 580", "NVIDIA GeForce RTX 3060", "NVIDIA GeForce RTX 4090"]);
    }

    #[tokio::test]
    async fn architecture_only_cards_are_never_surfaced() {
        let mut architecture = architecture();

        let table = unify(&mut popularity(), &mut architecture, &mut benchmarks(), &NoProgress).await.unwrap();

        assert!(!table.contains("NVIDIA GeForce GTX 480"));
        assert!(!architecture.lookups.contains(&CardId::from("NVIDIA GeForce GTX 480")));
    }

    #[tokio::test]
    async fn partial_presence_is_tolerated() {
        let mut architecture = architecture();

        let table = unify(&mut popularity(), &mut architecture, &mut benchmarks(), &NoProgress).await.unwrap();

        let everywhere = table.get("NVIDIA GeForce RTX 3060").unwrap();
        assert!(everywhere.popularity().is_some() && everywhere.architecture().is_some());
        assert_eq!(everywhere.g3d_score(), Some(17_000));

        let survey_only = table.get("AMD Radeon RX 580").unwrap();
        assert!(survey_only.architecture().is_none());
        assert_eq!(survey_only.g3d_score(), None);

        let unsurveyed = table.get("NVIDIA GeForce RTX 4090").unwrap();
        assert!(unsurveyed.popularity().is_none());
        assert_eq!(unsurveyed.architecture().map(|a| a.display_name.as_str()), Some("RTX 4090"));
    }

    #[tokio::test]
    async fn benchmark_pass_only_looks_up_new_ids() {
        let mut architecture = architecture();

        let _ = unify(&mut popularity(), &mut architecture, &mut benchmarks(), &NoProgress).await.unwrap();

        let rtx_3060_lookups = architecture.lookups.iter().filter(|id| id.as_str() == "NVIDIA GeForce RTX 3060").count();
        assert_eq!(rtx_3060_lookups, 1);
        assert_eq!(architecture.lookups.len(), 3);
    }

    #[tokio::test]
    async fn fetch_errors_abort_unification() {
        let err = unify(&mut popularity(), &mut FailingArchitecture, &mut benchmarks(), &NoProgress)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("unreachable"));
    }

    #[tokio::test]
    async fn empty_sources_give_an_empty_table() {
        let table = unify(
            &mut PopularityTable::new(),
            &mut FixedArchitecture::default(),
            &mut BenchmarkTable::default(),
            &NoProgress,
        )
        .await
        .unwrap();

        assert!(table.is_empty());
    }
}
