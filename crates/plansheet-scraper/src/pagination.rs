//! Next-page discovery on search-result listings.
//!
//! The listing marks its next page with an anchor rather than a response
//! header. Two markups are recognised, in order:
//!
//! ```text
//! <a class="s-pagination-next" href="/s?k=godrej&page=2">Next</a>
//! <a aria-label="Go to next page" href="/s?k=godrej&page=2">Next</a>
//! ```
//!
//! The `href` is usually relative and is resolved against the URL of the
//! page it was found on.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

static NEXT_SELECTORS: LazyLock<[Selector; 2]> = LazyLock::new(|| {
    [
        Selector::parse("a.s-pagination-next[href]").expect("valid pagination selector"),
        Selector::parse(r#"a[aria-label="Go to next page"][href]"#)
            .expect("valid pagination selector"),
    ]
});

/// Returns the absolute URL of the next listing page, or `None` on the last
/// page (no marker, blank `href`, or an `href` that does not resolve).
#[must_use]
pub fn next_page_url(document: &Html, current_url: &str) -> Option<String> {
    let href = NEXT_SELECTORS.iter().find_map(|sel| {
        document
            .select(sel)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .find(|h| !h.is_empty())
    })?;

    let base = Url::parse(current_url).ok()?;
    base.join(href).ok().map(String::from)
}
