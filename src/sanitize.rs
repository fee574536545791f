//! # Content Sanitizer
//!
//! Allow-list HTML sanitization for everything that ends up in a stored
//! record, plus lead-image extraction from raw bodies.
//!
//! - Kept tags: `p, br, strong, em, a, ul, ol, li`; on `a` only `href` and
//!   `target` survive. Everything else is stripped, script/style bodies
//!   included.
//! - Total functions: malformed input degrades to a best-effort or empty
//!   string, never an error.
//! - `extract_lead_image` must run on the *raw* body; sanitization removes
//!   `img` tags.

use std::collections::{HashMap, HashSet};

use once_cell::sync::OnceCell;
use scraper::{Html, Selector};

fn cleaner() -> &'static ammonia::Builder<'static> {
    static CLEANER: OnceCell<ammonia::Builder<'static>> = OnceCell::new();
    CLEANER.get_or_init(|| {
        let mut b = ammonia::Builder::default();
        b.tags(HashSet::from(["p", "br", "strong", "em", "a", "ul", "ol", "li"]));
        b.tag_attributes(HashMap::from([("a", HashSet::from(["href", "target"]))]));
        b.generic_attributes(HashSet::new());
        b.link_rel(None);
        b
    })
}

/// Reduce `html` to the allow-listed subset. Unknown tags are unwrapped
/// (their text kept), script/style contents are dropped outright.
pub fn sanitize(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    cleaner().clean(html).to_string()
}

/// First `<img src>` in document order, or `None`.
pub fn extract_lead_image(html: &str) -> Option<String> {
    if html.trim().is_empty() {
        return None;
    }
    static IMG: OnceCell<Selector> = OnceCell::new();
    let img = IMG.get_or_init(|| Selector::parse("img").unwrap());

    let doc = Html::parse_fragment(html);
    doc.select(img).find_map(|el| {
        el.value()
            .attr("src")
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(String::from)
    })
}

/// Plain-text cleanup for titles and scraped fragments: decode HTML
/// entities, collapse whitespace runs, trim.
pub fn clean_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());

    re_ws.replace_all(decoded.as_ref(), " ").trim().to_string()
}
