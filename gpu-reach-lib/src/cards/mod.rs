//! Canonical card ids and the unified card table.
//!
//! [`unify`] joins the popularity, architecture, and benchmark sources on [`CardId`] into a
//! [`CardTable`] of [`UnifiedCard`] records. The table is rebuilt on every run and never
//! persisted.

mod card_id;
mod progress;
mod table;
mod unified_card;
mod unifier;

pub use card_id::CardId;
pub use progress::{NoProgress, Progress};
pub use table::CardTable;
pub use unified_card::UnifiedCard;
pub use unifier::unify;
