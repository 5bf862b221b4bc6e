//! Adapters for the three data sources.
//!
//! Each source answers "what do you know about this canonical card id?" and "what do you know
//! about at all?". Name translation between a source's own naming and canonical ids happens
//! inside the adapter, so callers only ever see canonical ids.

pub mod architecture;
pub mod benchmark;
pub mod cache_doc;
pub mod http;
mod lookup;
pub mod popularity;

pub use lookup::Lookup;

use crate::Result;
use crate::cards::CardId;

/// A source of per-card data keyed by canonical card id.
pub trait CardSource {
    type Entry;

    /// Look up one card. `Ok(None)` means the source has no entry for it.
    ///
    /// Lookups may hit the network and update caches, hence `&mut self`.
    fn lookup(&mut self, card_id: &CardId) -> impl Future<Output = Result<Option<Self::Entry>>>;

    /// Everything the source currently knows, under canonical ids.
    ///
    /// For lazily populated sources this is only what has been looked up so far.
    fn enumerate(&self) -> Vec<(CardId, Self::Entry)>;
}
