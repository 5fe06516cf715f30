/// Snapshot cache with a fixed time-to-live
///
/// Successful fetches of remote sources are stored as JSON under the cache
/// directory, keyed by the data source. A fresh entry short-circuits the
/// fetch; failures are never cached. Local files are always read directly. The cache is an optimization only: read and write problems
/// are logged and otherwise ignored.
use crate::cli::default_cache_dir;
use crate::source::{DataSource, SourceError, fetch_leaderboard_data};
use crate::types::RawRow;
use fs2::FileExt;
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default lifetime of a cached snapshot
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Cache settings resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub ttl: Duration,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { dir: default_cache_dir(), ttl: DEFAULT_TTL, enabled: true }
    }
}

/// What gets written to disk for one source
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CacheEntry {
    pub source: String,
    /// Unix timestamp (seconds) of the fetch
    pub fetched_at: i64,
    pub rows: Vec<RawRow>,
}

impl CacheEntry {
    /// Whether the entry is still within its lifetime at `now` (unix seconds)
    pub fn is_fresh(&self, now: i64, ttl: Duration) -> bool {
        let age = now - self.fetched_at;
        age >= 0 && (age as u64) < ttl.as_secs()
    }
}

/// Rows plus when they were fetched and whether they came from the cache
#[derive(Debug, Clone)]
pub struct LoadedRows {
    pub rows: Vec<RawRow>,
    pub fetched_at: chrono::DateTime<chrono::Local>,
    pub from_cache: bool,
}

/// Fetch rows through the cache
pub fn load_rows(source: &DataSource, cache: &CacheConfig) -> Result<LoadedRows, SourceError> {
    load_rows_with(source, cache, fetch_leaderboard_data)
}

/// Same as `load_rows`, with the fetch function injected (for tests)
pub fn load_rows_with<F>(source: &DataSource, cache: &CacheConfig, fetch: F) -> Result<LoadedRows, SourceError>
where
    F: FnOnce(&DataSource) -> Result<Vec<RawRow>, SourceError>,
{
    let now = chrono::Local::now();
    let entry_path = entry_path(&cache.dir, source);
    let use_cache = cache.enabled && source.is_remote();
    if cache.enabled && !use_cache {
        debug!("not caching local source {}", source);
    }

    if use_cache {
        if let Some(entry) = read_entry(&entry_path) {
            if entry.is_fresh(now.timestamp(), cache.ttl) {
                debug!("using cached snapshot {:?} ({} rows)", entry_path, entry.rows.len());
                let fetched_at = chrono::DateTime::from_timestamp(entry.fetched_at, 0)
                    .map(|t| t.with_timezone(&chrono::Local))
                    .unwrap_or(now);
                return Ok(LoadedRows { rows: entry.rows, fetched_at, from_cache: true });
            }
            debug!("cached snapshot {:?} expired", entry_path);
        }
    }

    let rows = fetch(source)?;

    if use_cache {
        let entry = CacheEntry { source: source.cache_key(), fetched_at: now.timestamp(), rows };
        if let Err(e) = write_entry(&cache.dir, &entry_path, &entry) {
            warn!("failed to write snapshot cache {:?}: {}", entry_path, e);
        }
        return Ok(LoadedRows { rows: entry.rows, fetched_at: now, from_cache: false });
    }

    Ok(LoadedRows { rows, fetched_at: now, from_cache: false })
}

/// Cache file for a source: the key with anything path-unsafe replaced
pub fn entry_path(dir: &Path, source: &DataSource) -> PathBuf {
    let sanitized: String = source
        .cache_key()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();
    dir.join(format!("snapshot-{}.json", sanitized))
}

fn read_entry(path: &Path) -> Option<CacheEntry> {
    let content = fs::read(path).ok()?;
    match serde_json::from_slice(&content) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("ignoring unreadable snapshot cache {:?}: {}", path, e);
            None
        }
    }
}

/// Write atomically (temp file, then rename) while holding the cache lock
fn write_entry(dir: &Path, path: &Path, entry: &CacheEntry) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;

    let lock_file = OpenOptions::new().create(true).truncate(false).write(true).open(dir.join(".lock"))?;
    lock_file.lock_exclusive()?;

    let temp_path = path.with_extension("json.tmp");
    let result = (|| {
        let mut file = File::create(&temp_path)?;
        serde_json::to_writer(&mut file, entry)?;
        file.flush()?;
        drop(file);
        fs::rename(&temp_path, path)
    })();

    let _ = FileExt::unlock(&lock_file);
    result
}

/// Remove the whole cache directory
pub fn clean(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}
