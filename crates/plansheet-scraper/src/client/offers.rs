//! Per-product plan lookup for `PageClient`.

use plansheet_core::{ExtractionRules, PlanOffer};

use crate::plans::extract_offers_from_html;

use super::PageClient;

impl PageClient {
    /// Fetches the detail page for `asin` and extracts its plan offers.
    ///
    /// Never fails: a fetch error, a blocked page, or a page without offers
    /// all yield an empty list, and the product is reported without plans.
    pub async fn fetch_plan_offers(&self, asin: &str, rules: &ExtractionRules) -> Vec<PlanOffer> {
        let url = self.detail_url(asin);
        match self.fetch_page(&url).await {
            Ok(body) => {
                let offers = extract_offers_from_html(&body, rules);
                tracing::debug!(asin, offers = offers.len(), "detail page scanned");
                offers
            }
            Err(e) => {
                tracing::warn!(asin, error = %e, "plan lookup failed; recording no offers");
                Vec::new()
            }
        }
    }
}
