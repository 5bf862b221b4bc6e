use super::{BenchmarkEntry, BenchmarkTable, scrape};
use crate::Result;
use crate::sources::{cache_doc, http};
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::EnrichableExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

const LOG_TARGET: &str = "     bench";

pub const BENCHMARK_URL: &str = "https://www.videocardbenchmark.net/GPU_mega_page.html";

const SNAPSHOT_FILE: &str = "benchmark.json";

/// One complete download of the benchmark table, as persisted in the cache directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSnapshot {
    pub timestamp: DateTime<Utc>,
    pub entries: Vec<BenchmarkEntry>,
}

/// Fetches the benchmark table, reusing a cached snapshot while it is fresh.
#[derive(Debug, Clone)]
pub struct BenchmarkLoader {
    client: reqwest::Client,
    url: String,
    snapshot_path: Option<PathBuf>,
    ttl: Duration,
    ignore_cached: bool,
}

impl BenchmarkLoader {
    /// Create a loader. With no `cache_dir`, every load downloads the page.
    #[must_use]
    pub fn new(client: reqwest::Client, url: Option<&str>, cache_dir: Option<&Path>, ttl: Duration, ignore_cached: bool) -> Self {
        Self {
            client,
            url: url.unwrap_or(BENCHMARK_URL).to_string(),
            snapshot_path: cache_dir.map(|dir| dir.join(SNAPSHOT_FILE)),
            ttl,
            ignore_cached,
        }
    }

    /// Produce the benchmark table, downloading a new snapshot if the cached one is missing or stale.
    pub async fn load(&self, now: DateTime<Utc>) -> Result<BenchmarkTable> {
        if let Some(snapshot) = self.cached(now) {
            log::info!(target: LOG_TARGET, "Read benchmark snapshot from {}, {} entries", snapshot.timestamp, snapshot.entries.len());
            return Ok(BenchmarkTable::from_entries(snapshot.entries));
        }

        log::info!(target: LOG_TARGET, "Downloading benchmark table from '{}'", self.url);
        let start = Instant::now();

        let html = http::get_text(&self.client, &self.url).await?;
        let entries = scrape::parse_page(&html).map_err(|e| e.enrich_with(|| format!("scraping benchmark table from {}", self.url)))?;

        log::info!(
            target: LOG_TARGET,
            "Read {} benchmark entries in {:.3}s",
            entries.len(),
            start.elapsed().as_secs_f64()
        );

        let snapshot = BenchmarkSnapshot { timestamp: now, entries };
        if let Some(path) = &self.snapshot_path {
            cache_doc::save(&snapshot, path)?;
        }

        Ok(BenchmarkTable::from_entries(snapshot.entries))
    }

    fn cached(&self, now: DateTime<Utc>) -> Option<BenchmarkSnapshot> {
        if self.ignore_cached {
            return None;
        }

        let path = self.snapshot_path.as_ref()?;
        cache_doc::load_with_ttl(path, self.ttl, |snapshot: &BenchmarkSnapshot| snapshot.timestamp, now, "benchmark snapshot")
    }
}
