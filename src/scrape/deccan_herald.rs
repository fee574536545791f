//! Deccan Herald (English). Headless render; the homepage nests story
//! blocks, so extraction dedups by resolved link before the cap.

use std::collections::HashSet;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use crate::error::IngestError;
use crate::model::RawItem;
use crate::scrape::{
    anchor_href, element_text, first_text, resolve_link, teaser, ScrapeAdapter, ScrapeContext,
    MAX_ITEMS_PER_SOURCE,
};

const PAGE_URL: &str = "https://www.deccanherald.com/";

/// Titles at or under this length are section labels, not stories.
const MIN_TITLE_CHARS: usize = 10;

static BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://www.deccanherald.com").unwrap());
static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[class*='story'], .headline").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3, .headline").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DESC: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, .summary, .excerpt, .description").unwrap());

fn keep(title: &str) -> bool {
    title.chars().count() > MIN_TITLE_CHARS && !title.contains("Top News")
}

pub struct DeccanHerald;

impl DeccanHerald {
    pub fn extract(html: &str) -> Vec<RawItem> {
        let doc = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for el in doc.select(&CONTAINER) {
            let title = first_text(&el, &TITLE).unwrap_or_else(|| element_text(&el));
            let link = anchor_href(&el, &ANCHOR).and_then(|href| resolve_link(&BASE, &href));

            let link = match link {
                Some(l) if keep(&title) => l,
                _ => continue,
            };
            if !seen.insert(link.clone()) {
                continue;
            }

            items.push(teaser(title, link, first_text(&el, &DESC)));
            if items.len() >= MAX_ITEMS_PER_SOURCE {
                break;
            }
        }

        items
    }
}

#[async_trait]
impl ScrapeAdapter for DeccanHerald {
    fn source_id(&self) -> &'static str {
        "deccan-herald"
    }

    async fn collect(&self, ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        let html = ctx.renderer.render(PAGE_URL).await?;
        let items = Self::extract(&html);
        info!(source = self.source_id(), count = items.len(), "scraped landing page");
        Ok(items)
    }
}
