//! Search-result listing extraction.
//!
//! Each product card yields one [`ProductSummary`]. Every field has its own
//! fallback chain ending in [`NOT_AVAILABLE`], so a card with odd markup
//! still produces a row; only cards without an identifier are dropped.

use std::path::Path;
use std::sync::LazyLock;

use plansheet_core::{or_sentinel, ProductSummary};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::pagination::next_page_url;
use crate::parse_helpers::{node_text, own_text};

/// One parsed listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub products: Vec<ProductSummary>,
    /// Absolute URL of the following page, `None` on the last page.
    pub next_url: Option<String>,
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid listing selector")
}

/// Card selectors tried in order; the first that matches anything wins.
static CONTAINER_SELECTORS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        sel(r#"div[data-component-type="s-search-result"]"#),
        sel("div[data-asin][data-index]"),
        sel("div[data-asin]"),
    ]
});

static H2: LazyLock<Selector> = LazyLock::new(|| sel("h2"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
static TITLE_SPANS: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [sel("span.a-size-medium"), sel("span.a-size-base-plus")]);
static PRICE_WHOLE: LazyLock<Selector> = LazyLock::new(|| sel("span.a-price-whole"));
static PRICE_FRACTION: LazyLock<Selector> = LazyLock::new(|| sel("span.a-price-fraction"));
static LIST_PRICE: LazyLock<Selector> = LazyLock::new(|| sel("span.a-price.a-text-price"));
static OFFSCREEN: LazyLock<Selector> = LazyLock::new(|| sel("span.a-offscreen"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| sel("span"));
static RATING: LazyLock<Selector> = LazyLock::new(|| sel("span.a-icon-alt"));
static REVIEWS: LazyLock<Selector> = LazyLock::new(|| sel("span.a-size-base"));

static DISCOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+%\s+off").expect("valid discount regex"));
static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("valid rating regex"));
static REVIEWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9.,KMk]+)\)").expect("valid reviews regex"));

/// Parses a listing page and locates its next-page link.
#[must_use]
pub fn parse_listing_page(html: &str, page_url: &str, site_origin: &str) -> ListingPage {
    let document = Html::parse_document(html);
    ListingPage {
        products: extract_listings(&document, site_origin),
        next_url: next_page_url(&document, page_url),
    }
}

/// Parses a listing page saved from a browser.
///
/// `page_url` is the address the page was saved from and is only used to
/// resolve the next-page link. Bytes that are not valid UTF-8 are replaced.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the file cannot be read.
pub fn load_listing_file(
    path: &Path,
    page_url: &str,
    site_origin: &str,
) -> Result<ListingPage, ScraperError> {
    let bytes = std::fs::read(path).map_err(|source| ScraperError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);
    Ok(parse_listing_page(&html, page_url, site_origin))
}

/// Extracts every product card in document order.
#[must_use]
pub fn extract_listings(document: &Html, site_origin: &str) -> Vec<ProductSummary> {
    let containers: Vec<ElementRef<'_>> = CONTAINER_SELECTORS
        .iter()
        .map(|s| document.select(s).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    containers
        .into_iter()
        .filter_map(|card| extract_card(card, site_origin))
        .collect()
}

fn extract_card(card: ElementRef<'_>, site_origin: &str) -> Option<ProductSummary> {
    let asin = card.value().attr("data-asin").map(str::trim).unwrap_or("");
    if asin.is_empty() {
        tracing::debug!("skipping listing card without identifier");
        return None;
    }

    let mut summary = ProductSummary::new(site_origin, asin, &or_sentinel(title(card)));
    summary.current_price = or_sentinel(current_price(card));
    summary.list_price = or_sentinel(list_price(card));
    summary.discount = or_sentinel(discount(card));
    summary.rating = or_sentinel(rating(card));
    summary.review_count = or_sentinel(review_count(card));
    Some(summary)
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(node_text)
        .filter(|t| !t.is_empty())
}

fn title(card: ElementRef<'_>) -> Option<String> {
    if let Some(h2) = card.select(&H2).next() {
        return first_text(h2, &ANCHOR).or_else(|| Some(node_text(h2)));
    }
    TITLE_SPANS.iter().find_map(|s| first_text(card, s))
}

/// Text of the first match with no separators, so `1,299<span>.</span>`
/// reads as `1,299.`.
fn first_packed_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().map(str::trim).collect::<String>())
        .filter(|t| !t.is_empty())
}

fn current_price(card: ElementRef<'_>) -> Option<String> {
    let whole = first_packed_text(card, &PRICE_WHOLE)?;
    let mut price = whole.replace(',', "");
    if let Some(fraction) = first_packed_text(card, &PRICE_FRACTION) {
        price.push_str(&fraction);
    }
    Some(format!("₹{price}"))
}

fn list_price(card: ElementRef<'_>) -> Option<String> {
    let block = card.select(&LIST_PRICE).next()?;
    first_text(block, &OFFSCREEN).or_else(|| Some(node_text(block)))
}

fn discount(card: ElementRef<'_>) -> Option<String> {
    card.select(&SPAN)
        .map(own_text)
        .find(|t| DISCOUNT_RE.is_match(t))
}

fn rating(card: ElementRef<'_>) -> Option<String> {
    let text = first_text(card, &RATING)?;
    RATING_RE
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}

fn review_count(card: ElementRef<'_>) -> Option<String> {
    card.select(&REVIEWS).map(node_text).find_map(|text| {
        REVIEWS_RE
            .captures(&text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_owned())
    })
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
