// src/normalize.rs
use chrono::Utc;

use crate::model::{NewsRecord, RawItem};
use crate::registry::SourceDescriptor;
use crate::sanitize::{clean_text, extract_lead_image, sanitize};

/// Map a raw adapter item onto the stored record shape.
///
/// Total: every field has a defined default, so adapters can stay sloppy
/// about partial items and nothing past this point deals in `Option`s for
/// text fields. The only side effect is reading the clock for items that
/// carry no publication date.
pub fn normalize(raw: RawItem, source: &SourceDescriptor) -> NewsRecord {
    let title = raw
        .title
        .as_deref()
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No Title".to_string());

    let link = raw.link.map(|l| l.trim().to_string()).unwrap_or_default();

    // Body before sanitization; lead-image extraction needs the img tags
    // the sanitizer is about to strip.
    let body = raw
        .content
        .clone()
        .or_else(|| raw.description.clone())
        .unwrap_or_default();
    let snippet = raw.description.or(raw.content).unwrap_or_default();

    let image_url = raw
        .enclosure_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .or_else(|| extract_lead_image(&body));

    let guid = raw
        .guid
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| link.clone());

    NewsRecord {
        source_id: source.id.to_string(),
        language: source.language,
        title,
        description: sanitize(&snippet),
        link,
        published_at: raw.published_at.unwrap_or_else(Utc::now),
        guid,
        categories: raw
            .categories
            .iter()
            .map(|c| clean_text(c))
            .filter(|c| !c.is_empty())
            .collect(),
        author: raw.author.map(|a| clean_text(&a)).filter(|a| !a.is_empty()),
        image_url,
        content: sanitize(&body),
    }
}
