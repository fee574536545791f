// tests/engine_refresh.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use samachar::render::PageRenderer;
use samachar::scrape::{ScrapeAdapter, ScrapeContext};
use samachar::{
    IngestError, IngestionMethod, Language, RawItem, RefreshEngine, SourceDescriptor,
};

struct NoRender;

#[async_trait]
impl PageRenderer for NoRender {
    async fn render(&self, url: &str) -> Result<String, IngestError> {
        Err(IngestError::fetch(url, "renderer disabled in tests"))
    }
}

fn scrape_source(id: &'static str, language: Language) -> SourceDescriptor {
    SourceDescriptor {
        id,
        name: id,
        feed_endpoint: None,
        language,
        method: IngestionMethod::Scrape,
    }
}

fn item(title: &str, link: &str) -> RawItem {
    RawItem {
        title: Some(title.into()),
        link: Some(link.into()),
        ..Default::default()
    }
}

/// Returns whatever was last `set`; cycles are driven from the test body.
struct StaticAdapter {
    id: &'static str,
    items: Mutex<Vec<RawItem>>,
}

impl StaticAdapter {
    fn new(id: &'static str, items: Vec<RawItem>) -> Arc<Self> {
        Arc::new(Self {
            id,
            items: Mutex::new(items),
        })
    }

    fn set(&self, items: Vec<RawItem>) {
        *self.items.lock().unwrap() = items;
    }
}

#[async_trait]
impl ScrapeAdapter for StaticAdapter {
    fn source_id(&self) -> &'static str {
        self.id
    }

    async fn collect(&self, _ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        Ok(self.items.lock().unwrap().clone())
    }
}

struct FlakyAdapter {
    id: &'static str,
    fail: AtomicBool,
    items: Vec<RawItem>,
}

#[async_trait]
impl ScrapeAdapter for FlakyAdapter {
    fn source_id(&self) -> &'static str {
        self.id
    }

    async fn collect(&self, _ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(IngestError::fetch("https://down.test/", "connection refused"))
        } else {
            Ok(self.items.clone())
        }
    }
}

fn engine(
    sources: Vec<SourceDescriptor>,
    adapters: Vec<Arc<dyn ScrapeAdapter>>,
) -> RefreshEngine {
    RefreshEngine::with_parts(sources, adapters, Arc::new(NoRender))
}

#[tokio::test]
async fn unknown_source_is_source_not_found() {
    let adapter = StaticAdapter::new("alpha", vec![]);
    let eng = engine(vec![scrape_source("alpha", Language::Kannada)], vec![adapter]);

    let err = eng.refresh_source("nope").await.unwrap_err();
    assert!(matches!(err, IngestError::SourceNotFound(ref id) if id == "nope"));
    assert_eq!(err.to_string(), "unknown source: nope");
}

#[tokio::test]
async fn refresh_persists_normalized_records() {
    let adapter = StaticAdapter::new(
        "alpha",
        vec![
            item("ಮೊದಲ ಸುದ್ದಿ", "https://alpha.test/1"),
            item("ಎರಡನೇ ಸುದ್ದಿ", "https://alpha.test/2"),
        ],
    );
    let eng = engine(vec![scrape_source("alpha", Language::Kannada)], vec![adapter]);

    let count = eng.refresh_source("alpha").await.expect("refresh");
    assert_eq!(count, 2);

    let got = eng.news_by_source("alpha", 10);
    assert_eq!(got.len(), 2);
    for rec in &got {
        assert_eq!(rec.source_id, "alpha");
        assert_eq!(rec.language, Language::Kannada);
        // Scraped teasers have no guid of their own; the link serves.
        assert_eq!(rec.guid, rec.link);
    }
}

#[tokio::test]
async fn repeat_refresh_upserts_instead_of_duplicating() {
    let adapter = StaticAdapter::new(
        "alpha",
        vec![
            item("version one", "https://alpha.test/1"),
            item("other story", "https://alpha.test/2"),
        ],
    );
    let eng = engine(
        vec![scrape_source("alpha", Language::English)],
        vec![adapter.clone()],
    );

    assert_eq!(eng.refresh_source("alpha").await.unwrap(), 2);
    // The count reports what the cycle saw, replacements included.
    assert_eq!(eng.refresh_source("alpha").await.unwrap(), 2);
    assert_eq!(eng.news_by_source("alpha", 10).len(), 2);

    // A later cycle rewrites the record behind an unchanged link.
    adapter.set(vec![item("version two", "https://alpha.test/1")]);
    assert_eq!(eng.refresh_source("alpha").await.unwrap(), 1);

    let got = eng.news_by_source("alpha", 10);
    assert_eq!(got.len(), 2);
    let updated = got
        .iter()
        .find(|r| r.link == "https://alpha.test/1")
        .expect("record kept");
    assert_eq!(updated.title, "version two");
}

#[tokio::test]
async fn adapter_failure_is_an_empty_cycle_not_an_error() {
    let flaky = Arc::new(FlakyAdapter {
        id: "alpha",
        fail: AtomicBool::new(false),
        items: vec![item("headline", "https://alpha.test/1")],
    });
    let eng = engine(
        vec![scrape_source("alpha", Language::Hindi)],
        vec![flaky.clone()],
    );

    assert_eq!(eng.refresh_source("alpha").await.unwrap(), 1);

    // The source breaks; the cycle returns zero and earlier records stay
    // served until retention removes them.
    flaky.fail.store(true, Ordering::SeqCst);
    assert_eq!(eng.refresh_source("alpha").await.unwrap(), 0);
    assert_eq!(eng.news_by_source("alpha", 10).len(), 1);
    assert_eq!(eng.consecutive_empty("alpha"), Some(1));
}

#[tokio::test]
async fn failures_stay_isolated_per_source() {
    let good = StaticAdapter::new(
        "alpha",
        vec![
            item("first", "https://alpha.test/1"),
            item("second", "https://alpha.test/2"),
        ],
    );
    let bad = Arc::new(FlakyAdapter {
        id: "beta",
        fail: AtomicBool::new(true),
        items: vec![],
    });
    let eng = Arc::new(engine(
        vec![
            scrape_source("alpha", Language::English),
            scrape_source("beta", Language::English),
        ],
        vec![good, bad],
    ));

    let total = eng.refresh_all().await;
    assert_eq!(total, 2);
    assert_eq!(eng.news_by_source("alpha", 10).len(), 2);
    assert_eq!(eng.news_by_source("beta", 10).len(), 0);
    assert_eq!(eng.consecutive_empty("alpha"), Some(0));
    assert_eq!(eng.consecutive_empty("beta"), Some(1));
}

#[tokio::test]
async fn empty_streak_accumulates_and_resets() {
    let adapter = StaticAdapter::new("alpha", vec![]);
    let eng = engine(
        vec![scrape_source("alpha", Language::Kannada)],
        vec![adapter.clone()],
    );

    for _ in 0..3 {
        assert_eq!(eng.refresh_source("alpha").await.unwrap(), 0);
    }
    assert_eq!(eng.consecutive_empty("alpha"), Some(3));
    assert_eq!(eng.consecutive_empty("unknown"), None);

    adapter.set(vec![item("back to life", "https://alpha.test/1")]);
    assert_eq!(eng.refresh_source("alpha").await.unwrap(), 1);
    assert_eq!(eng.consecutive_empty("alpha"), Some(0));
}

#[tokio::test]
async fn language_queries_span_sources() {
    let a = StaticAdapter::new("alpha", vec![item("ಒಂದು", "https://alpha.test/1")]);
    let b = StaticAdapter::new("beta", vec![item("ಎರಡು", "https://beta.test/1")]);
    let eng = Arc::new(engine(
        vec![
            scrape_source("alpha", Language::Kannada),
            scrape_source("beta", Language::Kannada),
        ],
        vec![a, b],
    ));

    eng.refresh_all().await;
    assert_eq!(eng.news_by_language(Language::Kannada, 10).len(), 2);
    assert_eq!(eng.news_by_language(Language::Hindi, 10).len(), 0);
    assert_eq!(eng.sources_by_language(Language::Kannada).len(), 2);
    assert_eq!(eng.sources().len(), 2);
}

#[test]
#[should_panic(expected = "has no registered adapter")]
fn scrape_source_without_adapter_panics_at_construction() {
    let _ = engine(vec![scrape_source("alpha", Language::English)], vec![]);
}

#[test]
#[should_panic(expected = "duplicate source id")]
fn duplicate_ids_panic_at_construction() {
    let adapter = StaticAdapter::new("alpha", vec![]);
    let _ = engine(
        vec![
            scrape_source("alpha", Language::English),
            scrape_source("alpha", Language::Hindi),
        ],
        vec![adapter],
    );
}
