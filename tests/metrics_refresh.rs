// tests/metrics_refresh.rs
#![cfg(feature = "strict-metrics")]
use std::sync::Arc;

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusBuilder;
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

struct OneItem;

#[async_trait]
impl ScrapeAdapter for OneItem {
    fn source_id(&self) -> &'static str {
        "alpha"
    }

    async fn collect(&self, _ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        Ok(vec![RawItem {
            title: Some("headline".into()),
            link: Some("https://alpha.test/1".into()),
            ..Default::default()
        }])
    }
}

struct AlwaysDown;

#[async_trait]
impl ScrapeAdapter for AlwaysDown {
    fn source_id(&self) -> &'static str {
        "beta"
    }

    async fn collect(&self, _ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        Err(IngestError::fetch("https://beta.test/", "503"))
    }
}

fn source(id: &'static str) -> SourceDescriptor {
    SourceDescriptor {
        id,
        name: id,
        feed_endpoint: None,
        language: Language::English,
        method: IngestionMethod::Scrape,
    }
}

#[tokio::test]
async fn metrics_exposed_after_refresh() {
    // Install a local recorder for the test
    let handle = PrometheusBuilder::new().install_recorder().expect("recorder");

    let engine = RefreshEngine::with_parts(
        vec![source("alpha"), source("beta")],
        vec![Arc::new(OneItem), Arc::new(AlwaysDown)],
        Arc::new(NoRender),
    );
    engine.refresh_source("alpha").await.expect("alpha");
    engine.refresh_source("beta").await.expect("beta");

    // Scrape metrics text and check series presence by substring
    let out = handle.render();
    assert!(out.contains("refresh_items_total"));
    assert!(out.contains("refresh_failures_total"));
    assert!(out.contains("refresh_empty_total"));
    assert!(out.contains("refresh_last_run_ts"));
    assert!(out.contains("refresh_consecutive_empty"));
    assert!(out.contains(r#"source="alpha""#));
    assert!(out.contains(r#"source="beta""#));
}
