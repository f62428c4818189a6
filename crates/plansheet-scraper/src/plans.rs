//! Protection-plan extraction from product detail pages.
//!
//! Offers are phrases of the shape `"<description> for|at|from ₹<amount>"`
//! embedded in free page text. Extraction runs in two passes that share one
//! [`OfferCollector`]:
//!
//! 1. **Section pass**: locate the "Add a Protection Plan" block and scan
//!    each `label`/`span`/`div` inside it, first match per node.
//! 2. **Page pass**: if fewer than `max_offers` were found, scan the whole
//!    page text for every match.
//!
//! The collector keeps the keyword gate, the length gate, case-insensitive
//! dedup, and the first-found-wins cutoff consistent across both passes.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use plansheet_core::{ExtractionRules, PlanOffer};
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::classify::classify_brand;
use crate::parse_helpers::{collapse_whitespace, node_text, own_text, page_text};

/// Description (shortest run ending at the connective), connective, then a
/// rupee amount with optional thousands separators and paise.
static PLAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.+?)\s+(?:for|at|from)\s+₹\s*([0-9,]+(?:\.\d{2})?)")
        .expect("valid plan regex")
});
static SECTION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add a protection plan").expect("valid heading regex"));
static SECTION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)warranty|protection").expect("valid section id regex"));

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, h4, span").expect("valid heading selector"));
static SECTION_ID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[id]").expect("valid section selector"));
static CANDIDATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("label, span, div").expect("valid candidate selector"));

/// Accumulates accepted offers for one product.
///
/// Dedup state lives here, so it is scoped to a single product and carries
/// over from the section pass into the page pass.
pub struct OfferCollector<'r> {
    rules: &'r ExtractionRules,
    seen: HashSet<String>,
    offers: Vec<PlanOffer>,
}

impl<'r> OfferCollector<'r> {
    #[must_use]
    pub fn new(rules: &'r ExtractionRules) -> Self {
        Self {
            rules,
            seen: HashSet::new(),
            offers: Vec::new(),
        }
    }

    /// Returns `true` once `max_offers` offers have been accepted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.offers.len() >= self.rules.max_offers
    }

    /// Applies the first pattern match in `text`, if any.
    pub fn scan_first(&mut self, text: &str) {
        if self.is_full() {
            return;
        }
        if let Some(caps) = PLAN_PATTERN.captures(text) {
            self.accept(&caps);
        }
    }

    /// Applies every non-overlapping pattern match in `text`, in order, until
    /// the collector is full.
    pub fn scan_all(&mut self, text: &str) {
        for caps in PLAN_PATTERN.captures_iter(text) {
            if self.is_full() {
                break;
            }
            self.accept(&caps);
        }
    }

    #[must_use]
    pub fn into_offers(self) -> Vec<PlanOffer> {
        self.offers
    }

    fn accept(&mut self, caps: &Captures<'_>) -> bool {
        let (Some(raw_name), Some(raw_price)) = (caps.get(1), caps.get(2)) else {
            return false;
        };
        let name = collapse_whitespace(raw_name.as_str());

        if !self.rules.is_long_enough(&name) || !self.rules.has_keyword(&name) {
            return false;
        }
        if !self.seen.insert(name.to_lowercase()) {
            return false;
        }

        let price = Decimal::from_str(&raw_price.as_str().replace(',', "")).ok();
        let brand = classify_brand(&name);
        self.offers.push(PlanOffer { name, price, brand });
        true
    }
}

/// Extracts up to `rules.max_offers` offers from a parsed detail page.
#[must_use]
pub fn extract_offers(document: &Html, rules: &ExtractionRules) -> Vec<PlanOffer> {
    let mut collector = OfferCollector::new(rules);

    if let Some(section) = find_protection_section(document) {
        for node in section.select(&CANDIDATE_SELECTOR) {
            if collector.is_full() {
                break;
            }
            collector.scan_first(&node_text(node));
        }
    }

    if !collector.is_full() {
        collector.scan_all(&page_text(document));
    }

    collector.into_offers()
}

/// Extracts offers from raw detail-page HTML.
///
/// Pages shorter than `rules.blocked_min_bytes` are treated as blocked or
/// error pages and yield no offers without being parsed.
#[must_use]
pub fn extract_offers_from_html(html: &str, rules: &ExtractionRules) -> Vec<PlanOffer> {
    if rules.looks_blocked(html.len()) {
        tracing::debug!(bytes = html.len(), "detail page below size threshold; skipping extraction");
        return Vec::new();
    }
    let document = Html::parse_document(html);
    extract_offers(&document, rules)
}

/// Finds the container holding the protection-plan choices.
///
/// Prefers the nearest `div`/`section` around an "Add a Protection Plan"
/// heading; falls back to the first `div` whose id mentions warranty or
/// protection.
fn find_protection_section(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&HEADING_SELECTOR)
        .find(|el| SECTION_HEADING_RE.is_match(&own_text(*el)))
        .and_then(nearest_container)
        .or_else(|| {
            document.select(&SECTION_ID_SELECTOR).find(|el| {
                el.value()
                    .attr("id")
                    .is_some_and(|id| SECTION_ID_RE.is_match(id))
            })
        })
}

fn nearest_container(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| matches!(a.value().name(), "div" | "section"))
}

#[cfg(test)]
#[path = "plans_test.rs"]
mod tests;
