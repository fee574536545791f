// tests/scrape_news18.rs
use samachar::scrape::news18_hindi::News18Hindi;

#[test]
fn extracts_articles_and_drops_read_more() {
    let html = std::fs::read_to_string("tests/fixtures/news18_hindi_page.html").expect("fixture");
    let items = News18Hindi::extract(&html);

    assert_eq!(items.len(), 2);

    assert_eq!(
        items[0].title.as_deref(),
        Some("हिमाचल में भारी बारिश से 12 जिलों में रेड अलर्ट, स्कूल बंद")
    );
    assert_eq!(
        items[0].link.as_deref(),
        Some("https://hindi.news18.com/nation/himachal-rain-alert-12-districts.html")
    );
    assert!(items[0].description.as_deref().unwrap().contains("चेतावनी"));

    // A bare heading inside an enclosing anchor still resolves its link.
    assert_eq!(
        items[1].title.as_deref(),
        Some("IND vs AUS: तीसरे वनडे में भारत की छह विकेट से जीत, सीरीज बराबर")
    );
    assert_eq!(
        items[1].link.as_deref(),
        Some("https://hindi.news18.com/cricket/ind-vs-aus-3rd-odi-report.html")
    );

    // The "read more" strip never shows up as a story.
    assert!(items
        .iter()
        .all(|i| !i.title.as_deref().unwrap().contains("और भी पढ़ें")));
}
