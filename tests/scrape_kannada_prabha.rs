// tests/scrape_kannada_prabha.rs
use samachar::scrape::kannada_prabha::KannadaPrabha;

#[test]
fn steps_over_section_label_anchors() {
    let html =
        std::fs::read_to_string("tests/fixtures/kannada_prabha_page.html").expect("fixture");
    let items = KannadaPrabha::extract(&html);

    // Card one leads with its section anchor; the story anchor behind it is
    // the one extracted. A label-only card and a label-titled story are
    // dropped.
    assert_eq!(items.len(), 2);

    assert_eq!(
        items[0].title.as_deref(),
        Some("ಬೆಂಗಳೂರಿನಲ್ಲಿ ಭಾರೀ ಮಳೆ: ಹಲವೆಡೆ ಪ್ರವಾಹ ಪರಿಸ್ಥಿತಿ")
    );
    assert_eq!(
        items[0].link.as_deref(),
        Some("https://www.kannadaprabha.com/news/state/bengaluru-heavy-rain-flooding-2026")
    );
    assert!(items[0].description.as_deref().unwrap().contains("ರಕ್ಷಣಾ"));

    assert_eq!(
        items[1].title.as_deref(),
        Some("ಸಂಸತ್ ಮುಂಗಾರು ಅಧಿವೇಶನ ಇಂದಿನಿಂದ ಆರಂಭ")
    );
    assert_eq!(
        items[1].link.as_deref(),
        Some("https://www.kannadaprabha.com/nation/parliament-monsoon-session-begins")
    );
}
