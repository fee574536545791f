// tests/scrape_live_hindustan.rs
use samachar::scrape::live_hindustan::LiveHindustan;

#[test]
fn extracts_news_and_skips_horoscope_strips() {
    let html =
        std::fs::read_to_string("tests/fixtures/live_hindustan_page.html").expect("fixture");
    let items = LiveHindustan::extract(&html);

    assert_eq!(items.len(), 2);

    assert_eq!(
        items[0].title.as_deref(),
        Some("संसद में आज अहम विधेयक पर चर्चा, विपक्ष ने बुलाई बैठक")
    );
    assert_eq!(
        items[0].link.as_deref(),
        Some("https://www.livehindustan.com/national/parliament-key-bill-debate-20260821.html")
    );
    assert!(items[0].description.as_deref().unwrap().contains("मतदान"));

    assert_eq!(
        items[1].link.as_deref(),
        Some("https://www.livehindustan.com/entertainment/film-first-day-box-office.html")
    );

    // Horoscope teasers look like stories; the marker filter removes them.
    assert!(items
        .iter()
        .all(|i| !i.title.as_deref().unwrap().contains("राशिफल")));
}
