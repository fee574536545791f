// src/model.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::Language;

/// One item exactly as an adapter produced it, before normalization.
///
/// Feed adapters fill whatever the channel carried; scrape adapters fill
/// title/link/description and leave the rest to the normalizer's defaults.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// Full body HTML when the source provides one (`content:encoded`).
    pub content: Option<String>,
    /// Source-declared publication time, already parsed. `None` means the
    /// normalizer stamps the refresh time.
    pub published_at: Option<DateTime<Utc>>,
    pub guid: Option<String>,
    pub categories: Vec<String>,
    pub author: Option<String>,
    pub enclosure_url: Option<String>,
}

/// One normalized, sanitized record as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub source_id: String,
    pub language: Language,
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    /// Dedup key: source-supplied id, else the link.
    pub guid: String,
    pub categories: Vec<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub content: String,
}
