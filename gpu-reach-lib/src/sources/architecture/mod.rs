//! Architecture source backed by a remote GPU database.
//!
//! Lookups are lazy: a card is only queried when the unifier asks for it, and every answer
//! is cached permanently. Enumeration only sees what has been cached so far.

mod cache;
mod db;
mod entry;
mod fetcher;

pub use cache::ArchitectureCache;
pub use db::ArchitectureDb;
pub use entry::ArchitectureEntry;
pub use fetcher::{ARCHITECTURE_DB_URL, ArchitectureFetch, GraphQlFetcher};
