//! JSON documents persisted in the cache directory.

use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const LOG_TARGET: &str = " cache_doc";

/// Load a document, failing if the file is missing or unreadable.
pub fn load<T>(path: impl AsRef<Path>, context: impl AsRef<str>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let ctx = context.as_ref();

    let file = File::open(path).into_app_err_with(|| format!("unable to open file '{}'", path.display()))?;
    let data = serde_json::from_reader(BufReader::new(file)).into_app_err_with(|| format!("unable to parse file '{}'", path.display()))?;

    log::debug!(target: LOG_TARGET, "Loaded {ctx} from '{}'", path.display());
    Ok(data)
}

/// Load a document whose embedded timestamp must be younger than `ttl`.
///
/// Any failure to read the document counts as a miss. Timestamps in the future are treated as fresh.
pub fn load_with_ttl<T, F>(path: impl AsRef<Path>, ttl: Duration, get_timestamp: F, now: DateTime<Utc>, context: impl AsRef<str>) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
    F: FnOnce(&T) -> DateTime<Utc>,
{
    let ctx = context.as_ref();

    let data: T = match load(path, ctx) {
        Ok(data) => data,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Cache miss for {ctx}: {e}");
            return None;
        }
    };

    let Ok(age) = now.signed_duration_since(get_timestamp(&data)).to_std() else {
        log::debug!(target: LOG_TARGET, "Cache timestamp for {ctx} is in the future, treating as fresh");
        return Some(data);
    };

    if age < ttl {
        log::debug!(target: LOG_TARGET, "Cache hit for {ctx} (age: {:.1} days)", age.as_secs_f64() / 86400.0);
        Some(data)
    } else {
        log::debug!(
            target: LOG_TARGET,
            "Cache expired for {ctx} (age: {:.1} days, TTL: {:.1} days)",
            age.as_secs_f64() / 86400.0,
            ttl.as_secs_f64() / 86400.0
        );
        None
    }
}

/// Save a document, creating parent directories as needed.
pub fn save<T>(data: &T, path: impl AsRef<Path>) -> Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let file = File::create(path).into_app_err_with(|| format!("unable to create cache file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    #[cfg(debug_assertions)]
    let result = serde_json::to_writer_pretty(&mut writer, data);
    #[cfg(not(debug_assertions))]
    let result = serde_json::to_writer(&mut writer, data);

    result.into_app_err_with(|| format!("unable to write cache file '{}'", path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush cache file '{}'", path.display()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        timestamp: DateTime<Utc>,
        rows: Vec<String>,
    }

    fn snapshot(age: chrono::Duration) -> Snapshot {
        Snapshot {
            timestamp: Utc::now() - age,
            rows: vec!["GeForce RTX 3060".to_string()],
        }
    }

    const DAY: Duration = Duration::from_secs(86_400);

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        let original = snapshot(chrono::Duration::zero());

        save(&original, &path).unwrap();
        let loaded: Snapshot = load(&path, "snapshot").unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load::<Snapshot>(dir.path().join("absent.json"), "snapshot").unwrap_err();
        assert!(err.to_string().contains("unable to open"));
    }

    #[test]
    fn load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load::<Snapshot>(&path, "snapshot").unwrap_err();
        assert!(err.to_string().contains("unable to parse"));
    }

    #[test]
    fn fresh_document_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        save(&snapshot(chrono::Duration::hours(1)), &path).unwrap();

        let loaded = load_with_ttl(&path, DAY, |s: &Snapshot| s.timestamp, Utc::now(), "snapshot");
        assert!(loaded.is_some());
    }

    #[test]
    fn stale_document_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        save(&snapshot(chrono::Duration::days(2)), &path).unwrap();

        let loaded = load_with_ttl(&path, DAY, |s: &Snapshot| s.timestamp, Utc::now(), "snapshot");
        assert!(loaded.is_none());
    }

    #[test]
    fn future_timestamp_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        save(&snapshot(chrono::Duration::days(-1)), &path).unwrap();

        let loaded = load_with_ttl(&path, DAY, |s: &Snapshot| s.timestamp, Utc::now(), "snapshot");
        assert!(loaded.is_some());
    }

    #[test]
    fn missing_document_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_with_ttl(dir.path().join("nothing.json"), DAY, |s: &Snapshot| s.timestamp, Utc::now(), "snapshot");
        assert!(loaded.is_none());
    }
}
