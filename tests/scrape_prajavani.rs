// tests/scrape_prajavani.rs
use samachar::scrape::prajavani::Prajavani;

#[test]
fn extracts_story_cards() {
    let html = std::fs::read_to_string("tests/fixtures/prajavani_page.html").expect("fixture");
    let items = Prajavani::extract(&html);

    // Five cards on the page: one is a bare photo link (no headline text),
    // one has no anchor at all. Three survive.
    assert_eq!(items.len(), 3);

    assert_eq!(
        items[0].title.as_deref(),
        Some("ಬೆಂಗಳೂರು ಮೆಟ್ರೋ ಮೂರನೇ ಹಂತಕ್ಕೆ ಕೇಂದ್ರದ ಒಪ್ಪಿಗೆ")
    );
    assert_eq!(
        items[0].link.as_deref(),
        Some("https://www.prajavani.net/district/bengaluru/metro-phase-3-approved-2026")
    );
    assert!(items[0].description.as_deref().unwrap().contains("ಅನುಮೋದನೆ"));

    // Absolute links pass through untouched.
    assert_eq!(
        items[1].link.as_deref(),
        Some("https://www.prajavani.net/sports/cricket/india-squad-announced-asia-cup")
    );
    assert_eq!(items[1].description, None);

    assert_eq!(
        items[2].link.as_deref(),
        Some("https://www.prajavani.net/karnataka/crop-insurance-deadline-extended")
    );
}

#[test]
fn caps_runaway_pages() {
    let mut page = String::from("<html><body>");
    for i in 0..40 {
        page.push_str(&format!(
            r#"<div class="story-card"><a href="/story-{i}"><h2>ಸುದ್ದಿ ಶೀರ್ಷಿಕೆ ಸಂಖ್ಯೆ {i}</h2></a></div>"#
        ));
    }
    page.push_str("</body></html>");

    let items = Prajavani::extract(&page);
    assert_eq!(items.len(), 15);
}

#[test]
fn scraped_items_carry_no_date_or_guid() {
    let html = std::fs::read_to_string("tests/fixtures/prajavani_page.html").expect("fixture");
    for item in Prajavani::extract(&html) {
        assert_eq!(item.published_at, None);
        assert_eq!(item.guid, None);
    }
}
