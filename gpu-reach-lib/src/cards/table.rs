use super::{CardId, UnifiedCard};
use std::collections::BTreeMap;

/// The unified card table: one record per canonical id, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CardTable {
    cards: BTreeMap<CardId, UnifiedCard>,
}

impl CardTable {
    /// Build a table from cards. A later card with the same id replaces an earlier one.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = UnifiedCard>) -> Self {
        Self {
            cards: cards.into_iter().map(|card| (card.id().clone(), card)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, card_id: &str) -> Option<&UnifiedCard> {
        self.cards.get(card_id)
    }

    #[must_use]
    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.contains_key(card_id)
    }

    /// All cards in card id order.
    pub fn iter(&self) -> impl Iterator<Item = &UnifiedCard> {
        self.cards.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
