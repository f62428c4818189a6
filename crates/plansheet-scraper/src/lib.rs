pub mod classify;
pub mod client;
pub mod error;
pub mod listing;
pub mod pagination;
pub(crate) mod parse_helpers;
pub mod plans;
pub mod rate_limit;

pub use classify::classify_brand;
pub use client::{ClientOptions, PageClient};
pub use error::ScraperError;
pub use listing::{extract_listings, load_listing_file, parse_listing_page, ListingPage};
pub use pagination::next_page_url;
pub use plans::{extract_offers, extract_offers_from_html, OfferCollector};
pub use rate_limit::Pacing;
