//! Market-popularity source backed by a hardware survey.
//!
//! The survey is downloaded fresh on every run and is not cached. Its card names are the
//! canonical card ids for the whole system.

mod survey;
mod table;

pub use survey::{fetch, parse};
pub use table::{PopularityEntry, PopularityTable};
