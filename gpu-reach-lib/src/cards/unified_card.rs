use super::CardId;
use crate::sources::architecture::ArchitectureEntry;
use crate::sources::benchmark::BenchmarkEntry;
use crate::sources::popularity::PopularityEntry;

/// Everything known about one card, gathered from all three sources
///
/// At least one of the three entries is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedCard {
    id: CardId,
    popularity: Option<PopularityEntry>,
    architecture: Option<ArchitectureEntry>,
    benchmark: Option<BenchmarkEntry>,
}

impl UnifiedCard {
    /// Returns `None` if no source knows the card.
    #[must_use]
    pub fn new(
        id: CardId,
        popularity: Option<PopularityEntry>,
        architecture: Option<ArchitectureEntry>,
        benchmark: Option<BenchmarkEntry>,
    ) -> Option<Self> {
        if popularity.is_none() && architecture.is_none() && benchmark.is_none() {
            return None;
        }

        Some(Self {
            id,
            popularity,
            architecture,
            benchmark,
        })
    }

    #[must_use]
    pub const fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub const fn popularity(&self) -> Option<&PopularityEntry> {
        self.popularity.as_ref()
    }

    #[must_use]
    pub const fn architecture(&self) -> Option<&ArchitectureEntry> {
        self.architecture.as_ref()
    }

    #[must_use]
    pub const fn benchmark(&self) -> Option<&BenchmarkEntry> {
        self.benchmark.as_ref()
    }

    /// The card's G3D score, if benchmarked.
    #[must_use]
    pub fn g3d_score(&self) -> Option<u64> {
        self.benchmark.as_ref().map(|b| b.g3d_score)
    }

    /// The card's market share, or 0 if the survey doesn't list it.
    #[must_use]
    pub fn share(&self) -> f64 {
        self.popularity.as_ref().map_or(0.0, |p| p.share)
    }

    /// The architecture summary used in reports, if the card's architecture is known.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.architecture.as_ref().map(ArchitectureEntry::summary)
    }
}
