//! HTTP client for storefront listing and detail pages.

mod crawl;
mod guard;
mod offers;

use std::time::Duration;

use plansheet_core::{canonical_link, AppConfig};
use rand::{rng, Rng};
use reqwest::header;
use reqwest::Client;

use crate::error::ScraperError;
use crate::rate_limit::retry_once_on_blocked;

use guard::check_page;

/// Used only when the configured pool is empty.
const BROWSER_FALLBACK_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-IN,en-US;q=0.9,en;q=0.8";

#[derive(Clone)]
pub struct ClientOptions {
    /// Scheme and host of the storefront; detail URLs are built from it.
    pub site_origin: String,
    /// Raw `Cookie` header value sent with every request.
    pub session_cookie: Option<String>,
    /// One is picked at random per request.
    pub user_agents: Vec<String>,
    pub request_timeout_secs: u64,
    pub blocked_retry_backoff_ms: u64,
    /// Bodies shorter than this are treated as blocked.
    pub blocked_min_bytes: usize,
}

impl ClientOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            site_origin: config.site_origin.clone(),
            session_cookie: config.session_cookie.clone(),
            user_agents: config.user_agents.clone(),
            request_timeout_secs: config.request_timeout_secs,
            blocked_retry_backoff_ms: config.blocked_retry_backoff_ms,
            blocked_min_bytes: config.rules.blocked_min_bytes,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("site_origin", &self.site_origin)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[redacted]"),
            )
            .field("user_agents", &self.user_agents.len())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("blocked_retry_backoff_ms", &self.blocked_retry_backoff_ms)
            .field("blocked_min_bytes", &self.blocked_min_bytes)
            .finish()
    }
}

/// One browsing session against the storefront.
///
/// The underlying `reqwest::Client` keeps a cookie store, so cookies set by
/// earlier responses are replayed on later requests. A page that comes back
/// blocked is retried once, with a freshly picked user agent, after
/// `blocked_retry_backoff_ms`.
pub struct PageClient {
    client: Client,
    site_origin: String,
    referer: String,
    session_cookie: Option<String>,
    user_agents: Vec<String>,
    blocked_retry_backoff_ms: u64,
    blocked_min_bytes: usize,
}

impl PageClient {
    /// Builds the session.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(options: ClientOptions) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()?;

        let site_origin = options.site_origin.trim_end_matches('/').to_owned();
        let user_agents = if options.user_agents.is_empty() {
            vec![BROWSER_FALLBACK_UA.to_owned()]
        } else {
            options.user_agents
        };

        Ok(Self {
            client,
            referer: format!("{site_origin}/"),
            site_origin,
            session_cookie: options.session_cookie,
            user_agents,
            blocked_retry_backoff_ms: options.blocked_retry_backoff_ms,
            blocked_min_bytes: options.blocked_min_bytes,
        })
    }

    #[must_use]
    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    /// Canonical detail-page URL for `asin` on this storefront.
    #[must_use]
    pub fn detail_url(&self, asin: &str) -> String {
        canonical_link(&self.site_origin, asin)
    }

    /// Fetches `url` and returns the body of a usable page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] — `url` does not parse.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status (not retried).
    /// - [`ScraperError::Blocked`] — challenge or undersized page on both attempts.
    /// - [`ScraperError::Http`] — network or TLS failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        retry_once_on_blocked(self.blocked_retry_backoff_ms, || self.fetch_once(url)).await
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ScraperError> {
        let mut request = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.pick_user_agent())
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::REFERER, &self.referer)
            .header(header::CACHE_CONTROL, "no-cache");

        if let Some(cookie) = &self.session_cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        check_page(url, &body, self.blocked_min_bytes)?;
        tracing::debug!(url, bytes = body.len(), "page fetched");
        Ok(body)
    }

    fn pick_user_agent(&self) -> &str {
        let i = rng().random_range(0..self.user_agents.len());
        &self.user_agents[i]
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
