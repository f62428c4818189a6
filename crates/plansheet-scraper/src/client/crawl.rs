//! Multi-page listing crawl for `PageClient`.

use plansheet_core::ProductSummary;

use crate::error::ScraperError;
use crate::listing::{parse_listing_page, ListingPage};
use crate::rate_limit::Pacing;

use super::PageClient;

impl PageClient {
    /// Fetches and parses one listing page.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`].
    pub async fn fetch_listing_page(&self, url: &str) -> Result<ListingPage, ScraperError> {
        let body = self.fetch_page(url).await?;
        Ok(parse_listing_page(&body, url, &self.site_origin))
    }

    /// Crawls listing pages from `start_url`, following next-page links.
    ///
    /// Stops after `max_pages` pages, on the last page, or on the first page
    /// that fails; products from pages already fetched are kept in every case.
    /// `pacing` is applied between pages, never before the first.
    pub async fn collect_listings(
        &self,
        start_url: &str,
        max_pages: usize,
        pacing: &Pacing,
    ) -> Vec<ProductSummary> {
        let mut all_products: Vec<ProductSummary> = Vec::new();
        let mut visited: Vec<String> = Vec::new();
        let mut next = Some(start_url.to_owned());

        while let Some(url) = next.take() {
            if visited.len() >= max_pages {
                tracing::info!(max_pages, "page limit reached; stopping crawl");
                break;
            }
            if visited.contains(&url) {
                tracing::warn!(url, "next-page link points back to a visited page; stopping crawl");
                break;
            }
            if !visited.is_empty() {
                pacing.pause().await;
            }

            let page_number = visited.len() + 1;
            match self.fetch_listing_page(&url).await {
                Ok(page) => {
                    tracing::info!(
                        page = page_number,
                        products = page.products.len(),
                        "listing page parsed"
                    );
                    all_products.extend(page.products);
                    next = page.next_url;
                }
                Err(e) => {
                    tracing::warn!(
                        page = page_number,
                        url,
                        error = %e,
                        "listing page failed; keeping products collected so far"
                    );
                    break;
                }
            }
            visited.push(url);
        }

        all_products
    }
}
