use serde::{Deserialize, Serialize};

/// Placeholder written into any listing field that could not be extracted.
///
/// Fields are never omitted so every exported row has the same columns.
pub const NOT_AVAILABLE: &str = "N/A";

/// Builds the canonical detail-page URL for a product identifier.
///
/// Trailing slashes on `site_origin` are ignored, so
/// `canonical_link("https://www.amazon.in/", "B0C2NHPZJF")` and
/// `canonical_link("https://www.amazon.in", "B0C2NHPZJF")` agree.
#[must_use]
pub fn canonical_link(site_origin: &str, asin: &str) -> String {
    format!("{}/dp/{asin}", site_origin.trim_end_matches('/'))
}

/// One product as it appears on a search-results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Site-assigned identifier (ASIN), e.g. `"B0C2NHPZJF"`.
    pub asin: String,
    pub title: String,
    /// Selling price with currency prefix, e.g. `"₹1299.00"`.
    pub current_price: String,
    /// Struck-through list price (MRP) as displayed.
    pub list_price: String,
    /// Discount text, e.g. `"38% off"`.
    pub discount: String,
    /// Star rating as a decimal string, e.g. `"4.1"`.
    pub rating: String,
    /// Review count in the site's compact form, e.g. `"1.2K"` or `"231"`.
    pub review_count: String,
    /// Canonical detail-page URL, always derived from `asin`.
    pub link: String,
}

impl ProductSummary {
    /// Creates a summary with every optional field set to [`NOT_AVAILABLE`].
    ///
    /// The link is derived from `asin` and `site_origin` and cannot be set
    /// independently.
    #[must_use]
    pub fn new(site_origin: &str, asin: &str, title: &str) -> Self {
        Self {
            asin: asin.to_owned(),
            title: title.to_owned(),
            current_price: NOT_AVAILABLE.to_owned(),
            list_price: NOT_AVAILABLE.to_owned(),
            discount: NOT_AVAILABLE.to_owned(),
            rating: NOT_AVAILABLE.to_owned(),
            review_count: NOT_AVAILABLE.to_owned(),
            link: canonical_link(site_origin, asin),
        }
    }
}

/// Converts an optional extracted value into a field value, substituting
/// [`NOT_AVAILABLE`] when absent or blank.
#[must_use]
pub fn or_sentinel(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}
