//! # News Store
//!
//! In-memory, thread-safe record cache keyed by guid.
//!
//! - `upsert_all` replaces an existing guid wholesale, except the insertion
//!   timestamp, which is set once and never refreshed by updates.
//! - Retention is 7 days from first insertion (not from `published_at`).
//!   Expired entries are purged on the write path and additionally filtered
//!   on the read path, so a query can never return one.
//! - Queries snapshot, sort `published_at` descending and truncate; they
//!   never expose a partially-written record.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::model::NewsRecord;
use crate::registry::Language;

/// Records expire this long after first insertion.
pub const RETENTION_WINDOW: Duration = Duration::from_secs(7 * 24 * 3600);

/// Query size used by callers that do not pick their own.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

#[derive(Debug)]
struct Stored {
    inserted_at: DateTime<Utc>,
    record: NewsRecord,
}

/// Thread-safe in-memory record store.
#[derive(Debug)]
pub struct NewsStore {
    records: RwLock<HashMap<String, Stored>>,
    retention: Duration,
}

impl Default for NewsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsStore {
    pub fn new() -> Self {
        Self::with_retention(RETENTION_WINDOW)
    }

    /// Custom retention window; tests shrink it to drive expiry.
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            retention,
        }
    }

    /// Upsert a batch, one atomic replacement per guid. Returns the batch
    /// size applied.
    pub fn upsert_all(&self, batch: Vec<NewsRecord>) -> usize {
        self.upsert_all_at(batch, Utc::now())
    }

    /// Same as `upsert_all` with an injected insertion timestamp. The
    /// timestamp applies to first insertions only; updates keep the
    /// original one.
    pub fn upsert_all_at(&self, batch: Vec<NewsRecord>, inserted_at: DateTime<Utc>) -> usize {
        let applied = batch.len();
        let now = Utc::now();

        let mut map = self.records.write().expect("news store lock poisoned");
        for record in batch {
            match map.get_mut(&record.guid) {
                Some(existing) => existing.record = record,
                None => {
                    map.insert(
                        record.guid.clone(),
                        Stored {
                            inserted_at,
                            record,
                        },
                    );
                }
            }
        }
        // Write-path purge keeps the map bounded between refreshes.
        let retention = self.retention;
        map.retain(|_, s| !expired(s.inserted_at, now, retention));

        applied
    }

    /// Non-expired records for one source, newest `published_at` first.
    /// Unknown ids yield an empty Vec.
    pub fn by_source(&self, source_id: &str, limit: usize) -> Vec<NewsRecord> {
        self.query(limit, |r| r.source_id == source_id)
    }

    /// Non-expired records across all sources of one language, newest
    /// `published_at` first.
    pub fn by_language(&self, language: Language, limit: usize) -> Vec<NewsRecord> {
        self.query(limit, |r| r.language == language)
    }

    /// First-insertion time for a guid, if it is still held.
    pub fn inserted_at(&self, guid: &str) -> Option<DateTime<Utc>> {
        let map = self.records.read().expect("news store lock poisoned");
        map.get(guid).map(|s| s.inserted_at)
    }

    /// Count of live (non-expired) records.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        let map = self.records.read().expect("news store lock poisoned");
        map.values()
            .filter(|s| !expired(s.inserted_at, now, self.retention))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn query<F>(&self, limit: usize, pred: F) -> Vec<NewsRecord>
    where
        F: Fn(&NewsRecord) -> bool,
    {
        let now = Utc::now();
        let mut out: Vec<NewsRecord> = {
            let map = self.records.read().expect("news store lock poisoned");
            map.values()
                .filter(|s| !expired(s.inserted_at, now, self.retention))
                .map(|s| &s.record)
                .filter(|r| pred(r))
                .cloned()
                .collect()
        };
        // Stable order for equal timestamps so paging callers see a fixed view.
        out.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.guid.cmp(&b.guid))
        });
        out.truncate(limit);
        out
    }
}

fn expired(inserted_at: DateTime<Utc>, now: DateTime<Utc>, retention: Duration) -> bool {
    now.signed_duration_since(inserted_at)
        .to_std()
        .map(|age| age >= retention)
        .unwrap_or(false)
}
