use super::TargetConfiguration;
use crate::cards::{CardId, CardTable, UnifiedCard};
use core::fmt::{Display, Formatter};
use std::collections::{BTreeMap, BTreeSet};

const LOG_TARGET: &str = "  analysis";

/// Outcome of resolving a configuration's reference card against the card table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The reference card exists and has a benchmark score.
    Resolved { card: &'a UnifiedCard, g3d_score: u64 },

    /// No source knows the reference card.
    UnknownCard,

    /// The reference card exists but was never benchmarked, so there is nothing to compare against.
    NoBenchmark(&'a UnifiedCard),
}

/// Why a configuration produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownCard,
    NoBenchmark,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownCard => write!(f, "reference card not found in any source"),
            Self::NoBenchmark => write!(f, "reference card has no benchmark score"),
        }
    }
}

/// The cards that meet one configuration's bar and the market share they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityResult {
    pub config_name: String,
    pub reference_card_id: CardId,
    pub reference_score: u64,
    pub eligible_card_ids: BTreeSet<CardId>,
    pub aggregated_market_share: f64,
}

/// Results for a whole target list.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    results: BTreeMap<String, EligibilityResult>,
    skipped: BTreeMap<String, SkipReason>,
}

impl Analysis {
    /// The result for a configuration, or `None` if it was skipped or isn't in the list.
    #[must_use]
    pub fn get(&self, config_name: &str) -> Option<&EligibilityResult> {
        self.results.get(config_name)
    }

    /// Results of all configurations that could be evaluated, in name order.
    pub fn results(&self) -> impl Iterator<Item = &EligibilityResult> {
        self.results.values()
    }

    /// Why a configuration was skipped, if it was.
    #[must_use]
    pub fn skip_reason(&self, config_name: &str) -> Option<SkipReason> {
        self.skipped.get(config_name).copied()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Whether a card is in a configuration's eligible set. Skipped configurations include no cards.
    #[must_use]
    pub fn is_eligible(&self, config_name: &str, card_id: &CardId) -> bool {
        self.results
            .get(config_name)
            .is_some_and(|result| result.eligible_card_ids.contains(card_id))
    }
}

/// Find a configuration's reference card and its score.
#[must_use]
pub fn resolve<'a>(config: &TargetConfiguration, table: &'a CardTable) -> Resolution<'a> {
    match table.get(config.reference_card_id.as_str()) {
        None => Resolution::UnknownCard,
        Some(card) => card
            .g3d_score()
            .map_or(Resolution::NoBenchmark(card), |g3d_score| Resolution::Resolved { card, g3d_score }),
    }
}

/// Ids of every benchmarked card scoring at least `threshold`.
#[must_use]
pub fn eligible_cards(table: &CardTable, threshold: u64) -> BTreeSet<CardId> {
    table
        .iter()
        .filter(|card| card.g3d_score().is_some_and(|score| score >= threshold))
        .map(|card| card.id().clone())
        .collect()
}

/// Sum of the shares of the given cards. Cards outside the survey contribute nothing.
#[must_use]
pub fn market_share(table: &CardTable, card_ids: &BTreeSet<CardId>) -> f64 {
    card_ids
        .iter()
        .filter_map(|id| table.get(id.as_str()))
        .map(UnifiedCard::share)
        .sum()
}

/// Evaluate one configuration, or explain why it can't be.
pub fn evaluate(config: &TargetConfiguration, table: &CardTable) -> Result<EligibilityResult, SkipReason> {
    let g3d_score = match resolve(config, table) {
        Resolution::Resolved { g3d_score, .. } => g3d_score,
        Resolution::UnknownCard => return Err(SkipReason::UnknownCard),
        Resolution::NoBenchmark(_) => return Err(SkipReason::NoBenchmark),
    };

    let eligible_card_ids = eligible_cards(table, g3d_score);
    let aggregated_market_share = market_share(table, &eligible_card_ids);

    Ok(EligibilityResult {
        config_name: config.name.clone(),
        reference_card_id: config.reference_card_id.clone(),
        reference_score: g3d_score,
        eligible_card_ids,
        aggregated_market_share,
    })
}

/// Evaluate every configuration against the card table.
///
/// A configuration whose reference card is unknown or unbenchmarked is skipped with a warning;
/// the others are unaffected.
#[must_use]
pub fn analyze(configs: &[TargetConfiguration], table: &CardTable) -> Analysis {
    let mut analysis = Analysis::default();

    for config in configs {
        match evaluate(config, table) {
            Ok(result) => {
                log::debug!(
                    target: LOG_TARGET,
                    "'{}': {} eligible cards covering {:.2}% of the market",
                    config.name,
                    result.eligible_card_ids.len(),
                    result.aggregated_market_share * 100.0
                );
                let _ = analysis.results.insert(config.name.clone(), result);
            }
            Err(reason) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Skipping configuration '{}' ('{}'): {reason}",
                    config.name,
                    config.reference_card_id
                );
                let _ = analysis.skipped.insert(config.name.clone(), reason);
            }
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::benchmark::BenchmarkEntry;
    use crate::sources::popularity::{PopularityEntry, PopularityTable};

    const EPSILON: f64 = 1e-12;

    fn card(id: &str, share: Option<f64>, g3d_score: Option<u64>) -> UnifiedCard {
        UnifiedCard::new(
            CardId::from(id),
            share.map(|share| PopularityEntry {
                display_name: id.to_string(),
                share,
            }),
            None,
            g3d_score.map(|g3d_score| BenchmarkEntry {
                display_name: id.to_string(),
                g3d_score,
                g2d_score: 0,
            }),
        )
        .unwrap()
    }

    fn ids(names: &[&str]) -> BTreeSet<CardId> {
        names.iter().map(|name| CardId::from(*name)).collect()
    }

    fn sample_table() -> CardTable {
        CardTable::from_cards([
            card("fast", Some(0.1), Some(3000)),
            card("mid", Some(0.2), Some(2000)),
            card("mid twin", Some(0.05), Some(2000)),
            card("slow", Some(0.4), Some(1000)),
            card("unsurveyed", None, Some(2500)),
            card("unbenchmarked", Some(0.25), None),
        ])
    }

    #[test]
    fn worked_example() {
        let mut popularity: PopularityTable = [("A", 0.5), ("B", 0.3), ("Other", 0.2)]
            .into_iter()
            .map(|(name, share)| (name.to_string(), share))
            .collect();
        let _ = popularity.remove_category("Other").unwrap();

        let table = CardTable::from_cards(popularity.iter().map(|(id, entry)| {
            let score = if id.as_str() == "A" { 1000 } else { 500 };
            UnifiedCard::new(
                id.clone(),
                Some(entry.clone()),
                None,
                Some(BenchmarkEntry {
                    display_name: id.to_string(),
                    g3d_score: score,
                    g2d_score: 0,
                }),
            )
            .unwrap()
        }));

        let analysis = analyze(
            &[TargetConfiguration::new("high", "A"), TargetConfiguration::new("low", "B")],
            &table,
        );

        let high = analysis.get("high").unwrap();
        assert_eq!(high.eligible_card_ids, ids(&["A"]));
        assert!((high.aggregated_market_share - 0.625).abs() < EPSILON);

        let low = analysis.get("low").unwrap();
        assert_eq!(low.eligible_card_ids, ids(&["A", "B"]));
        assert!((low.aggregated_market_share - 1.0).abs() < EPSILON);
    }

    #[test]
    fn reference_card_is_always_eligible_for_itself() {
        let table = sample_table();
        for card in table.iter().filter(|card| card.g3d_score().is_some()) {
            let config = TargetConfiguration::new("self", card.id().clone());
            let result = evaluate(&config, &table).unwrap();
            assert!(result.eligible_card_ids.contains(card.id()), "{}", card.id());
        }
    }

    #[test]
    fn ties_are_eligible() {
        let result = evaluate(&TargetConfiguration::new("mid", "mid"), &sample_table()).unwrap();
        assert_eq!(result.eligible_card_ids, ids(&["fast", "mid", "mid twin", "unsurveyed"]));
    }

    #[test]
    fn higher_bar_gives_a_subset() {
        let table = sample_table();
        let scored: Vec<_> = table.iter().filter_map(|card| card.g3d_score().map(|s| (card.id().clone(), s))).collect();

        for (a, score_a) in &scored {
            for (b, score_b) in &scored {
                if score_a > score_b {
                    let set_a = evaluate(&TargetConfiguration::new("a", a.clone()), &table).unwrap().eligible_card_ids;
                    let set_b = evaluate(&TargetConfiguration::new("b", b.clone()), &table).unwrap().eligible_card_ids;
                    assert!(set_a.is_subset(&set_b), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn share_sums_surveyed_eligible_cards_only() {
        let result = evaluate(&TargetConfiguration::new("mid", "mid"), &sample_table()).unwrap();

        // fast + mid + mid twin; unsurveyed is eligible but contributes nothing
        assert!((result.aggregated_market_share - 0.35).abs() < EPSILON);
        assert!(result.eligible_card_ids.contains("unsurveyed"));
    }

    #[test]
    fn non_eligible_shares_do_not_matter() {
        let mut cards: Vec<_> = sample_table().iter().cloned().collect();
        let before = evaluate(&TargetConfiguration::new("mid", "mid"), &CardTable::from_cards(cards.clone()))
            .unwrap()
            .aggregated_market_share;

        for card in &mut cards {
            if card.id().as_str() == "slow" {
                *card = self::card("slow", Some(0.9), Some(1000));
            }
        }
        let after = evaluate(&TargetConfiguration::new("mid", "mid"), &CardTable::from_cards(cards))
            .unwrap()
            .aggregated_market_share;

        assert!((before - after).abs() < EPSILON);
    }

    #[test]
    fn unknown_reference_is_skipped_without_affecting_others() {
        let configs = [
            TargetConfiguration::new("ghost", "Voodoo 5 6000"),
            TargetConfiguration::new("mid", "mid"),
            TargetConfiguration::new("no score", "unbenchmarked"),
        ];

        let analysis = analyze(&configs, &sample_table());

        assert!(analysis.get("ghost").is_none());
        assert_eq!(analysis.skip_reason("ghost"), Some(SkipReason::UnknownCard));
        assert_eq!(analysis.skip_reason("no score"), Some(SkipReason::NoBenchmark));
        assert_eq!(analysis.skipped_count(), 2);
        assert!(analysis.get("mid").is_some());
        assert_eq!(analysis.results().count(), 1);
    }

    #[test]
    fn resolve_distinguishes_outcomes() {
        let table = sample_table();

        assert!(matches!(
            resolve(&TargetConfiguration::new("x", "fast"), &table),
            Resolution::Resolved { g3d_score: 3000, .. }
        ));
        assert_eq!(resolve(&TargetConfiguration::new("x", "nope"), &table), Resolution::UnknownCard);
        assert!(matches!(resolve(&TargetConfiguration::new("x", "unbenchmarked"), &table), Resolution::NoBenchmark(_)));
    }

    #[test]
    fn membership_lookup() {
        let analysis = analyze(&[TargetConfiguration::new("mid", "mid")], &sample_table());

        assert!(analysis.is_eligible("mid", &CardId::from("fast")));
        assert!(!analysis.is_eligible("mid", &CardId::from("slow")));
        assert!(!analysis.is_eligible("unlisted", &CardId::from("fast")));
    }
}
