//! # Refresh Orchestrator
//!
//! One refresh cycle per call: resolve the source, dispatch to its adapter
//! by ingestion method, normalize, upsert. Adapter failures stay inside the
//! cycle as "zero items"; the only error a caller ever sees is an unknown
//! source id. Concurrent refreshes of the same source serialize on a
//! per-source guard, and distinct sources never contend.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::IngestError;
use crate::feed::FeedAdapter;
use crate::fetch;
use crate::model::{NewsRecord, RawItem};
use crate::normalize::normalize;
use crate::registry::{self, IngestionMethod, Language, SourceDescriptor};
use crate::render::{ChromeRenderer, PageRenderer};
use crate::scrape::{self, ScrapeAdapter, ScrapeContext};
use crate::store::NewsStore;

/// Zero-item cycles in a row before the structural-drift warning. Scrape
/// selectors degrade silently when a page changes; this is the operator's
/// signal.
const EMPTY_STREAK_WARN: u32 = 3;

/// One-time metrics registration (so series show up on the embedder's
/// /metrics endpoint with descriptions).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "refresh_items_total",
            "Records seen across refresh cycles, replacements included."
        );
        describe_counter!("refresh_failures_total", "Adapter fetch/parse failures.");
        describe_counter!(
            "refresh_empty_total",
            "Refresh cycles that produced zero records."
        );
        describe_counter!("scheduler_ticks_total", "Timer ticks, per source.");
        describe_gauge!(
            "refresh_last_run_ts",
            "Unix ts when any source last completed a refresh."
        );
        describe_gauge!(
            "refresh_consecutive_empty",
            "Consecutive zero-item refreshes, per source."
        );
        describe_histogram!("feed_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Owns the catalog, the record store, and both adapter kinds.
pub struct RefreshEngine {
    sources: Vec<SourceDescriptor>,
    store: NewsStore,
    feed: FeedAdapter,
    scrapers: HashMap<&'static str, Arc<dyn ScrapeAdapter>>,
    ctx: ScrapeContext,
    inflight: HashMap<&'static str, tokio::sync::Mutex<()>>,
    empty_streaks: Mutex<HashMap<&'static str, u32>>,
}

impl RefreshEngine {
    /// Builtin catalog, builtin scrape adapters, headless Chrome renderer.
    pub fn new() -> Self {
        Self::with_parts(
            registry::SOURCES.to_vec(),
            scrape::builtin_adapters(),
            Arc::new(ChromeRenderer::new()),
        )
    }

    /// Fully injected construction, used by tests and embedders.
    ///
    /// Panics when the catalog is inconsistent: a duplicate id, a feed
    /// source without an endpoint, or a scrape source without a registered
    /// adapter is a configuration error, not a runtime condition.
    pub fn with_parts(
        sources: Vec<SourceDescriptor>,
        adapters: Vec<Arc<dyn ScrapeAdapter>>,
        renderer: Arc<dyn PageRenderer>,
    ) -> Self {
        let scrapers: HashMap<&'static str, Arc<dyn ScrapeAdapter>> =
            adapters.into_iter().map(|a| (a.source_id(), a)).collect();

        let mut ids = HashSet::new();
        for src in &sources {
            assert!(ids.insert(src.id), "duplicate source id: {}", src.id);
            match src.method {
                IngestionMethod::Feed => assert!(
                    src.feed_endpoint.is_some(),
                    "feed source {} has no endpoint",
                    src.id
                ),
                IngestionMethod::Scrape => assert!(
                    scrapers.contains_key(src.id),
                    "scrape source {} has no registered adapter",
                    src.id
                ),
            }
        }

        let http = fetch::http_client();
        let inflight = sources
            .iter()
            .map(|s| (s.id, tokio::sync::Mutex::new(())))
            .collect();

        Self {
            feed: FeedAdapter::new(http.clone()),
            ctx: ScrapeContext::new(renderer, http),
            store: NewsStore::new(),
            inflight,
            empty_streaks: Mutex::new(HashMap::new()),
            sources,
            scrapers,
        }
    }

    /// Run one fetch → normalize → persist cycle for `id`.
    ///
    /// Returns the number of records seen this cycle, replacements included.
    /// A reachable-but-broken source is `Ok(0)`; only an unregistered id is
    /// an error.
    pub async fn refresh_source(&self, id: &str) -> Result<usize, IngestError> {
        ensure_metrics_described();

        let src = *self
            .find(id)
            .ok_or_else(|| IngestError::SourceNotFound(id.to_string()))?;

        let _inflight = self
            .inflight
            .get(src.id)
            .expect("guard exists for every registered source")
            .lock()
            .await;

        let raw = match self.collect_raw(&src).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, source = src.id, "refresh failed; keeping cached records");
                counter!("refresh_failures_total", "source" => src.id).increment(1);
                Vec::new()
            }
        };

        let records: Vec<NewsRecord> = raw.into_iter().map(|item| normalize(item, &src)).collect();
        let count = self.store.upsert_all(records);

        self.note_cycle_size(&src, count);
        counter!("refresh_items_total", "source" => src.id).increment(count as u64);
        gauge!("refresh_last_run_ts").set(chrono::Utc::now().timestamp() as f64);
        info!(source = src.id, count, "refresh cycle complete");

        Ok(count)
    }

    /// Refresh every registered source concurrently; failures stay isolated
    /// per source. Returns the summed cycle count.
    pub async fn refresh_all(self: &Arc<Self>) -> usize {
        let mut set = JoinSet::new();
        for src in &self.sources {
            let engine = Arc::clone(self);
            let id = src.id;
            set.spawn(async move { engine.refresh_source(id).await });
        }

        let mut total = 0;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok(count)) => total += count,
                Ok(Err(e)) => warn!(error = %e, "refresh task failed"),
                Err(e) => warn!(error = %e, "refresh task panicked"),
            }
        }
        total
    }

    async fn collect_raw(&self, src: &SourceDescriptor) -> Result<Vec<RawItem>, IngestError> {
        match src.method {
            IngestionMethod::Feed => {
                let endpoint = src.feed_endpoint.expect("validated at construction");
                self.feed.fetch_items(endpoint).await
            }
            IngestionMethod::Scrape => {
                let adapter = self
                    .scrapers
                    .get(src.id)
                    .expect("validated at construction");
                adapter.collect(&self.ctx).await
            }
        }
    }

    fn note_cycle_size(&self, src: &SourceDescriptor, count: usize) {
        let mut streaks = self.empty_streaks.lock().expect("streak lock poisoned");
        let streak = streaks.entry(src.id).or_insert(0);
        if count == 0 {
            *streak += 1;
            counter!("refresh_empty_total", "source" => src.id).increment(1);
            if *streak >= EMPTY_STREAK_WARN {
                warn!(
                    source = src.id,
                    streak = *streak,
                    "source keeps returning zero items; page structure may have drifted"
                );
            }
        } else {
            *streak = 0;
        }
        gauge!("refresh_consecutive_empty", "source" => src.id).set(*streak as f64);
    }

    fn find(&self, id: &str) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|s| s.id == id)
    }

    // ---- read side ----

    /// Non-expired records for one source, newest first.
    pub fn news_by_source(&self, id: &str, limit: usize) -> Vec<NewsRecord> {
        self.store.by_source(id, limit)
    }

    /// Non-expired records across all sources of one language, newest first.
    pub fn news_by_language(&self, language: Language, limit: usize) -> Vec<NewsRecord> {
        self.store.by_language(language, limit)
    }

    /// The engine's catalog, in registration order.
    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// Catalog entries for one language, for grouped listings.
    pub fn sources_by_language(&self, language: Language) -> Vec<&SourceDescriptor> {
        self.sources
            .iter()
            .filter(|s| s.language == language)
            .collect()
    }

    /// Zero-item cycles in a row for `id`; `None` for unregistered ids.
    pub fn consecutive_empty(&self, id: &str) -> Option<u32> {
        let src = self.find(id)?;
        let streaks = self.empty_streaks.lock().expect("streak lock poisoned");
        Some(streaks.get(src.id).copied().unwrap_or(0))
    }

    pub fn store(&self) -> &NewsStore {
        &self.store
    }
}

impl Default for RefreshEngine {
    fn default() -> Self {
        Self::new()
    }
}
