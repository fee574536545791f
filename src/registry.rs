//! # Source Registry
//!
//! Static catalog of news sources the pipeline ingests from.
//!
//! - Each source declares its language and how it is ingested: `feed` for
//!   syndication feeds, `scrape` for HTML-only sites.
//! - Feed sources carry their feed endpoint; scrape sources carry none (the
//!   scrape adapter owns its page URL and selectors).
//! - Lookup is exact-match on the id; unknown ids are `None`, never an error.

use serde::{Deserialize, Serialize};

/// Publication language of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Kannada,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Kannada, Language::Hindi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Kannada => "kannada",
            Language::Hindi => "hindi",
        }
    }

    /// Self-designation, as shown to readers of that language.
    pub fn native_label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Hindi => "हिन्दी",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a source's items are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionMethod {
    Feed,
    Scrape,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    /// Present only for `Feed` sources.
    pub feed_endpoint: Option<&'static str>,
    pub language: Language,
    pub method: IngestionMethod,
}

/// The builtin catalog. Order groups sources by language.
pub const SOURCES: &[SourceDescriptor] = &[
    SourceDescriptor {
        id: "the-hindu",
        name: "The Hindu",
        feed_endpoint: Some("https://www.thehindu.com/feeder/default.rss"),
        language: Language::English,
        method: IngestionMethod::Feed,
    },
    SourceDescriptor {
        id: "indian-express",
        name: "Indian Express",
        feed_endpoint: Some("https://indianexpress.com/feed/"),
        language: Language::English,
        method: IngestionMethod::Feed,
    },
    SourceDescriptor {
        id: "deccan-herald",
        name: "Deccan Herald",
        feed_endpoint: None,
        language: Language::English,
        method: IngestionMethod::Scrape,
    },
    SourceDescriptor {
        id: "prajavani",
        name: "Prajavani",
        feed_endpoint: None,
        language: Language::Kannada,
        method: IngestionMethod::Scrape,
    },
    SourceDescriptor {
        id: "kannada-prabha",
        name: "Kannada Prabha",
        feed_endpoint: None,
        language: Language::Kannada,
        method: IngestionMethod::Scrape,
    },
    SourceDescriptor {
        id: "aaj-tak",
        name: "Aaj Tak",
        feed_endpoint: Some("https://www.aajtak.in/rssfeeds/?id=home"),
        language: Language::Hindi,
        method: IngestionMethod::Feed,
    },
    SourceDescriptor {
        id: "news18-hindi",
        name: "News18 Hindi",
        feed_endpoint: None,
        language: Language::Hindi,
        method: IngestionMethod::Scrape,
    },
    SourceDescriptor {
        id: "live-hindustan",
        name: "Live Hindustan",
        feed_endpoint: None,
        language: Language::Hindi,
        method: IngestionMethod::Scrape,
    },
];

/// Exact-match lookup by source id.
pub fn find(id: &str) -> Option<&'static SourceDescriptor> {
    SOURCES.iter().find(|s| s.id == id)
}

/// All catalog entries for one language, in catalog order.
pub fn by_language(language: Language) -> Vec<&'static SourceDescriptor> {
    SOURCES.iter().filter(|s| s.language == language).collect()
}
