//! Prajavani (Kannada). The homepage builds its story rail client-side, so
//! the page goes through the headless renderer before extraction.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use crate::error::IngestError;
use crate::model::RawItem;
use crate::scrape::{
    element_text, first_text, resolve_link, teaser, ScrapeAdapter, ScrapeContext,
    MAX_ITEMS_PER_SOURCE,
};

const PAGE_URL: &str = "https://www.prajavani.net/";

static BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://www.prajavani.net").unwrap());
static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse("div.story-card").unwrap());
static HEADLINE_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.headline-link, a").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3").unwrap());
static DESC: Lazy<Selector> = Lazy::new(|| Selector::parse("p, .summary, .excerpt").unwrap());

pub struct Prajavani;

impl Prajavani {
    /// Pure extraction from the rendered homepage.
    pub fn extract(html: &str) -> Vec<RawItem> {
        let doc = Html::parse_document(html);
        let mut items = Vec::new();

        for card in doc.select(&CARD) {
            let anchor = match card.select(&HEADLINE_ANCHOR).next() {
                Some(a) => a,
                None => continue,
            };

            // Headline lives in a heading inside the anchor on most cards;
            // plain-text anchors carry it directly.
            let title = first_text(&anchor, &TITLE).unwrap_or_else(|| element_text(&anchor));
            let link = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_link(&BASE, href));

            let link = match link {
                Some(l) if !title.is_empty() => l,
                _ => continue,
            };

            items.push(teaser(title, link, first_text(&card, &DESC)));
            if items.len() >= MAX_ITEMS_PER_SOURCE {
                break;
            }
        }

        items
    }
}

#[async_trait]
impl ScrapeAdapter for Prajavani {
    fn source_id(&self) -> &'static str {
        "prajavani"
    }

    async fn collect(&self, ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        let html = ctx.renderer.render(PAGE_URL).await?;
        let items = Self::extract(&html);
        info!(source = self.source_id(), count = items.len(), "scraped landing page");
        Ok(items)
    }
}
