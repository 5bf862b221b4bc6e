//! Benchmark source scraped from the benchmark site's mega page.
//!
//! The whole table is downloaded at once and persisted as a timestamped snapshot. Lookups are
//! served from memory.

mod entry;
mod scrape;
mod snapshot;
mod table;

pub use entry::BenchmarkEntry;
pub use scrape::parse_page;
pub use snapshot::{BENCHMARK_URL, BenchmarkLoader, BenchmarkSnapshot};
pub use table::BenchmarkTable;
