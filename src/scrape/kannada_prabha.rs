//! Kannada Prabha (Kannada). The story grid arrives server-side, so a
//! plain HTTP fetch is enough; no browser session. Cards lead with a
//! section-label anchor the extractor has to step over.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

use crate::error::IngestError;
use crate::fetch;
use crate::model::RawItem;
use crate::scrape::{
    element_text, first_text, resolve_link, teaser, ScrapeAdapter, ScrapeContext,
    MAX_ITEMS_PER_SOURCE,
};

const PAGE_URL: &str = "https://www.kannadaprabha.com/";

/// Section labels the homepage repeats between cards.
const SECTION_LABELS: [&str; 3] = ["ದೇಶ", "ರಾಜ್ಯ", "ವಿಶ್ವ"];

static BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://www.kannadaprabha.com").unwrap());
static CARD: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[class*='story-card'], div[class*='storycard']").unwrap()
});
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3").unwrap());
static DESC: Lazy<Selector> = Lazy::new(|| Selector::parse("p, .summary, .excerpt").unwrap());

fn is_section_anchor(a: &ElementRef) -> bool {
    a.value()
        .attr("class")
        .is_some_and(|c| c.contains("arr--section-name"))
}

fn keep(title: &str) -> bool {
    title.chars().count() > 4 && !SECTION_LABELS.iter().any(|label| title.contains(label))
}

pub struct KannadaPrabha;

impl KannadaPrabha {
    pub fn extract(html: &str) -> Vec<RawItem> {
        let doc = Html::parse_document(html);
        let mut items = Vec::new();

        for card in doc.select(&CARD) {
            // First anchor that is the story, not the card's section label.
            let anchor = match card.select(&ANCHOR).find(|a| !is_section_anchor(a)) {
                Some(a) => a,
                None => continue,
            };

            let title = first_text(&anchor, &TITLE).unwrap_or_else(|| element_text(&anchor));
            let link = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_link(&BASE, href));

            let link = match link {
                Some(l) if keep(&title) => l,
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
impl ScrapeAdapter for KannadaPrabha {
    fn source_id(&self) -> &'static str {
        "kannada-prabha"
    }

    async fn collect(&self, ctx: &ScrapeContext) -> Result<Vec<RawItem>, IngestError> {
        let html = fetch::get_text(&ctx.http, PAGE_URL).await?;
        let items = Self::extract(&html);
        info!(source = self.source_id(), count = items.len(), "scraped landing page");
        Ok(items)
    }
}
