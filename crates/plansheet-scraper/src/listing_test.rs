use super::*;
use plansheet_core::NOT_AVAILABLE;

const ORIGIN: &str = "https://www.amazon.in";
const PAGE_URL: &str = "https://www.amazon.in/s?k=godrej&i=kitchen";

fn full_card(asin: &str) -> String {
    format!(
        r#"<div data-component-type="s-search-result" data-asin="{asin}" data-index="1">
          <h2><a href="/Godrej-Mixer/dp/{asin}"><span>Godrej 750 W Mixer Grinder</span></a></h2>
          <span class="a-icon-alt">4.1 out of 5 stars</span>
          <span class="a-size-base s-underline-text">(1.2K)</span>
          <span class="a-price"><span class="a-price-whole">1,299<span class="a-price-decimal">.</span></span><span class="a-price-fraction">00</span></span>
          <span class="a-price a-text-price"><span class="a-offscreen">₹2,100</span><span aria-hidden="true">₹2,100</span></span>
          <span>(38% off)</span>
        </div>"#
    )
}

fn listings(html: &str) -> Vec<ProductSummary> {
    extract_listings(&Html::parse_document(html), ORIGIN)
}

#[test]
fn extracts_every_field_from_a_full_card() {
    let products = listings(&full_card("B0C2NHPZJF"));
    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert_eq!(p.asin, "B0C2NHPZJF");
    assert_eq!(p.title, "Godrej 750 W Mixer Grinder");
    assert_eq!(p.current_price, "₹1299.00");
    assert_eq!(p.list_price, "₹2,100");
    assert_eq!(p.discount, "(38% off)");
    assert_eq!(p.rating, "4.1");
    assert_eq!(p.review_count, "1.2K");
    assert_eq!(p.link, "https://www.amazon.in/dp/B0C2NHPZJF");
}

#[test]
fn missing_fields_become_sentinels() {
    let html = r#"<div data-component-type="s-search-result" data-asin="B0AAAAAAAA"></div>"#;
    let products = listings(html);
    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert_eq!(p.title, NOT_AVAILABLE);
    assert_eq!(p.current_price, NOT_AVAILABLE);
    assert_eq!(p.list_price, NOT_AVAILABLE);
    assert_eq!(p.discount, NOT_AVAILABLE);
    assert_eq!(p.rating, NOT_AVAILABLE);
    assert_eq!(p.review_count, NOT_AVAILABLE);
    assert_eq!(p.link, "https://www.amazon.in/dp/B0AAAAAAAA");
}

#[test]
fn card_without_identifier_is_skipped() {
    let html = format!(
        r#"{}<div data-component-type="s-search-result" data-asin=" "><h2>Sponsored slot</h2></div>{}"#,
        full_card("B01"),
        full_card("B02")
    );
    let asins: Vec<_> = listings(&html).into_iter().map(|p| p.asin).collect();
    assert_eq!(asins, ["B01", "B02"]);
}

#[test]
fn card_missing_identifier_attribute_is_skipped() {
    let html = format!(
        r#"{}<div data-component-type="s-search-result"><h2>Godrej Ad Banner</h2></div>"#,
        full_card("B01")
    );
    let asins: Vec<_> = listings(&html).into_iter().map(|p| p.asin).collect();
    assert_eq!(asins, ["B01"]);
}

#[test]
fn price_without_fraction() {
    let html = r#"<div data-component-type="s-search-result" data-asin="B03">
        <span class="a-price-whole">12,499</span></div>"#;
    assert_eq!(listings(html)[0].current_price, "₹12499");
}

#[test]
fn title_falls_back_to_plain_heading_then_span() {
    let heading = r#"<div data-component-type="s-search-result" data-asin="B04"><h2> Godrej Kettle </h2></div>"#;
    assert_eq!(listings(heading)[0].title, "Godrej Kettle");

    let span = r#"<div data-component-type="s-search-result" data-asin="B05">
        <span class="a-size-base-plus a-color-base">Godrej Toaster</span></div>"#;
    assert_eq!(listings(span)[0].title, "Godrej Toaster");
}

#[test]
fn list_price_without_offscreen_uses_block_text() {
    let html = r#"<div data-component-type="s-search-result" data-asin="B06">
        <span class="a-price a-text-price">₹3,000</span></div>"#;
    assert_eq!(listings(html)[0].list_price, "₹3,000");
}

#[test]
fn unmatched_rating_and_reviews_are_sentinels() {
    let html = r#"<div data-component-type="s-search-result" data-asin="B07">
        <span class="a-icon-alt">No ratings yet</span>
        <span class="a-size-base">Free delivery</span></div>"#;
    let p = &listings(html)[0];
    assert_eq!(p.rating, NOT_AVAILABLE);
    assert_eq!(p.review_count, NOT_AVAILABLE);
}

#[test]
fn falls_back_to_indexed_asin_containers() {
    let html = r#"
        <div data-asin="B08" data-index="3"><h2>Godrej Chopper</h2></div>
        <div data-asin="B09"><h2>Not a result card</h2></div>"#;
    let asins: Vec<_> = listings(html).into_iter().map(|p| p.asin).collect();
    assert_eq!(asins, ["B08"]);
}

#[test]
fn falls_back_to_bare_asin_containers() {
    let html = r#"<div data-asin=""></div><div data-asin="B10"><h2>Godrej Blender</h2></div>"#;
    let asins: Vec<_> = listings(html).into_iter().map(|p| p.asin).collect();
    assert_eq!(asins, ["B10"]);
}

#[test]
fn page_without_cards_is_empty() {
    assert!(listings("<html><body><p>No results for your search.</p></body></html>").is_empty());
}

#[test]
fn parse_listing_page_finds_next_url() {
    let html = format!(
        r#"<html><body>{}<a class="s-pagination-next" href="/s?k=godrej&i=kitchen&page=2">Next</a></body></html>"#,
        full_card("B11")
    );
    let page = parse_listing_page(&html, PAGE_URL, ORIGIN);
    assert_eq!(page.products.len(), 1);
    assert_eq!(
        page.next_url.as_deref(),
        Some("https://www.amazon.in/s?k=godrej&i=kitchen&page=2")
    );
}

#[test]
fn parse_listing_page_last_page_has_no_next_url() {
    let page = parse_listing_page(&full_card("B12"), PAGE_URL, ORIGIN);
    assert!(page.next_url.is_none());
}

#[test]
fn load_listing_file_reads_saved_page() {
    let path = std::env::temp_dir().join(format!("plansheet-listing-{}.html", std::process::id()));
    std::fs::write(&path, full_card("B13")).unwrap();
    let page = load_listing_file(&path, PAGE_URL, ORIGIN).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(page.products[0].asin, "B13");
}

#[test]
fn load_listing_file_missing_is_io_error() {
    let path = std::env::temp_dir().join("plansheet-listing-does-not-exist.html");
    let err = load_listing_file(&path, PAGE_URL, ORIGIN).unwrap_err();
    assert!(matches!(err, ScraperError::Io { .. }));
}
