// tests/scrape_deccan.rs
use samachar::scrape::deccan_herald::DeccanHerald;

#[test]
fn extracts_and_dedups_nested_blocks() {
    let html =
        std::fs::read_to_string("tests/fixtures/deccan_herald_page.html").expect("fixture");
    let items = DeccanHerald::extract(&html);

    // The wrapping storygroup and its inner card resolve to the same link;
    // only one survives. Labels ("Top News", "Sports") and the linkless
    // teaser are dropped.
    assert_eq!(items.len(), 2);

    assert_eq!(
        items[0].title.as_deref(),
        Some("Karnataka clears new industrial policy targeting chip assembly units")
    );
    assert_eq!(
        items[0].link.as_deref(),
        Some("https://www.deccanherald.com/state/karnataka-industrial-policy-2026")
    );
    assert!(items[0]
        .description
        .as_deref()
        .unwrap()
        .contains("capital subsidies"));

    assert_eq!(
        items[1].title.as_deref(),
        Some("Bengaluru water board raises tariffs for bulk users from September")
    );
    assert_eq!(
        items[1].link.as_deref(),
        Some("https://www.deccanherald.com/bengaluru/water-board-raises-bulk-tariff")
    );
    assert_eq!(items[1].description, None);
}
