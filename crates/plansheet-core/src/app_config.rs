use std::path::PathBuf;

use crate::rules::ExtractionRules;

/// Browser user agents rotated across requests when
/// `PLANSHEET_USER_AGENTS` is not set.
pub const DEFAULT_USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Scheme and host of the storefront, e.g. `"https://www.amazon.in"`.
    pub site_origin: String,
    /// Search-results URL crawled by `plansheet scrape` when `--url` is absent.
    pub search_url: String,
    /// Raw `Cookie` header value copied from a browser session.
    pub session_cookie: Option<String>,
    pub user_agents: Vec<String>,
    pub request_timeout_secs: u64,
    pub inter_request_delay_ms: u64,
    pub inter_request_jitter_ms: u64,
    pub blocked_retry_backoff_ms: u64,
    pub max_pages: usize,
    pub output_dir: PathBuf,
    /// Second directory the workbook is copied into, if any.
    pub copy_dir: Option<PathBuf>,
    /// Display text of the hyperlink cell in the "Product Link" column.
    pub link_label: String,
    pub rules: ExtractionRules,
    /// `None` when mail is not fully configured; the notify step is skipped.
    pub mail: Option<MailConfig>,
}

#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub app_password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub recipients: Vec<String>,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("app_password", &"[redacted]")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("recipients", &self.recipients)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("site_origin", &self.site_origin)
            .field("search_url", &self.search_url)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[redacted]"),
            )
            .field("user_agents", &self.user_agents.len())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("inter_request_jitter_ms", &self.inter_request_jitter_ms)
            .field("blocked_retry_backoff_ms", &self.blocked_retry_backoff_ms)
            .field("max_pages", &self.max_pages)
            .field("output_dir", &self.output_dir)
            .field("copy_dir", &self.copy_dir)
            .field("link_label", &self.link_label)
            .field("rules", &self.rules)
            .field("mail", &self.mail)
            .finish()
    }
}
