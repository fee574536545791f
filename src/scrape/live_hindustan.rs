//! Live Hindustan. Headless render, loose containers deduped by link, and
//! a zodiac filter: the homepage interleaves horoscope strips that look
//! exactly like news teasers.

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

const PAGE_URL: &str = "https://www.livehindustan.com/";

const MIN_TITLE_CHARS: usize = 10;

/// "राशि" catches horoscope roundups; the sign names catch per-sign strips.
const ZODIAC_MARKERS: [&str; 4] = ["राशि", "मेष", "वृष", "मिथुन"];

static BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://www.livehindustan.com").unwrap());
static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, [class*='news'], h1, h2, h3").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, .headline, .title, .story__title, .news-title").unwrap()
});
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DESC: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, .summary, .excerpt, .description, .story__desc, .news-desc").unwrap()
});

fn keep(title: &str) -> bool {
    title.chars().count() > MIN_TITLE_CHARS
        && !title.contains("Top Hindi News")
        && !ZODIAC_MARKERS.iter().any(|m| title.contains(m))
}

pub struct LiveHindustan;

impl LiveHindustan {
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
impl ScrapeAdapter for LiveHindustan {
    fn source_id(&self) -> &'static str {
        "live-hindustan"
    }

    async fn collect(&self, ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        let html = ctx.renderer.render(PAGE_URL).await?;
        let items = Self::extract(&html);
        info!(source = self.source_id(), count = items.len(), "scraped landing page");
        Ok(items)
    }
}
