//! # Scrape Adapters
//!
//! One adapter per HTML-only source. Each owns its landing-page URL, its
//! container selector, its title/link/description fallback chains, and an
//! exclusion filter for navigation labels and similar boilerplate. All
//! extraction is a pure function over the fetched document, so fixtures can
//! drive it; only the page load itself touches the network.
//!
//! Adapters register by source id in `builtin_adapters()`. The engine
//! resolves the table once at construction; an unmapped scrape source is a
//! configuration error there, never a runtime branch.

pub mod deccan_herald;
pub mod kannada_prabha;
pub mod live_hindustan;
pub mod news18_hindi;
pub mod prajavani;

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::IngestError;
use crate::model::RawItem;
use crate::render::PageRenderer;
use crate::sanitize::clean_text;

/// Landing pages list far more teasers than anyone scrolls past; everything
/// beyond this is section filler.
pub const MAX_ITEMS_PER_SOURCE: usize = 15;

/// Shared handles an adapter needs to load its page: the headless renderer
/// for JavaScript-built sites and the plain HTTP client for the rest.
pub struct ScrapeContext {
    pub renderer: Arc<dyn PageRenderer>,
    pub http: reqwest::Client,
}

impl ScrapeContext {
    pub fn new(renderer: Arc<dyn PageRenderer>, http: reqwest::Client) -> Self {
        Self { renderer, http }
    }
}

/// One HTML-only source. `collect` returns raw items or a fetch/parse
/// error; the orchestrator converts errors into an empty cycle.
#[async_trait]
pub trait ScrapeAdapter: Send + Sync {
    /// Registry id this adapter serves.
    fn source_id(&self) -> &'static str;

    async fn collect(&self, ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError>;
}

/// The builtin adapter set, one entry per scrape source in the catalog.
pub fn builtin_adapters() -> Vec<Arc<dyn ScrapeAdapter>> {
    vec![
        Arc::new(prajavani::Prajavani),
        Arc::new(deccan_herald::DeccanHerald),
        Arc::new(kannada_prabha::KannadaPrabha),
        Arc::new(news18_hindi::News18Hindi),
        Arc::new(live_hindustan::LiveHindustan),
    ]
}

/// Whole-element text, entity-decoded and whitespace-collapsed.
pub(crate) fn element_text(el: &ElementRef) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first match under `el` that is non-empty.
pub(crate) fn first_text(el: &ElementRef, sel: &Selector) -> Option<String> {
    el.select(sel)
        .map(|m| element_text(&m))
        .find(|t| !t.is_empty())
}

/// First `href` under `el`; when the container carries none, the container
/// itself or its nearest enclosing anchor supplies it.
pub(crate) fn anchor_href(el: &ElementRef, inner: &Selector) -> Option<String> {
    if let Some(a) = el.select(inner).next() {
        return a.value().attr("href").map(str::to_string);
    }
    if el.value().name() == "a" {
        if let Some(href) = el.value().attr("href") {
            return Some(href.to_string());
        }
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find_map(|a| {
            if a.value().name() == "a" {
                a.value().attr("href").map(str::to_string)
            } else {
                None
            }
        })
}

/// Absolute links pass through; anything else resolves against the
/// source's base URL.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// Scraped teasers carry no source id or date; the normalizer keys them by
/// link and stamps the refresh time.
pub(crate) fn teaser(title: String, link: String, description: Option<String>) -> RawItem {
    RawItem {
        title: Some(title),
        link: Some(link),
        description: description.filter(|d| !d.is_empty()),
        ..Default::default()
    }
}
