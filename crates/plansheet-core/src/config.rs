use std::path::{Path, PathBuf};

use crate::app_config::{AppConfig, MailConfig, DEFAULT_USER_AGENTS};
use crate::rules::ExtractionRules;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(
        |key| std::env::var(key),
        |path| std::fs::read_to_string(path).ok(),
    )
}

/// Build application configuration from an env-var lookup and a file reader.
///
/// The file reader is only consulted for the recipients fallback file.
fn build_app_config<F, R>(lookup: F, read_file: R) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    R: Fn(&Path) -> Option<String>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("PLANSHEET_LOG_LEVEL", "info");
    let site_origin = parse_origin(&or_default("PLANSHEET_SITE_ORIGIN", "https://www.amazon.in"))?;
    let search_url = or_default(
        "PLANSHEET_SEARCH_URL",
        "https://www.amazon.in/s?k=godrej&i=kitchen",
    );
    let session_cookie = optional("PLANSHEET_SESSION_COOKIE");
    let user_agents = optional("PLANSHEET_USER_AGENTS").map_or_else(
        || DEFAULT_USER_AGENTS.iter().map(|ua| (*ua).to_string()).collect(),
        |raw| parse_user_agents(&raw),
    );
    if user_agents.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLANSHEET_USER_AGENTS".to_string(),
            reason: "no user agents after splitting on '|'".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("PLANSHEET_REQUEST_TIMEOUT_SECS", "20")?;
    let inter_request_delay_ms = parse_u64("PLANSHEET_INTER_REQUEST_DELAY_MS", "2000")?;
    let inter_request_jitter_ms = parse_u64("PLANSHEET_INTER_REQUEST_JITTER_MS", "1500")?;
    let blocked_retry_backoff_ms = parse_u64("PLANSHEET_BLOCKED_RETRY_BACKOFF_MS", "5000")?;
    let max_pages = parse_usize("PLANSHEET_MAX_PAGES", "20")?;

    let output_dir = PathBuf::from(or_default("PLANSHEET_OUTPUT_DIR", "."));
    let copy_dir = optional("PLANSHEET_COPY_DIR").map(PathBuf::from);
    let link_label = or_default("PLANSHEET_LINK_LABEL", "View on Amazon");

    let mut rules = ExtractionRules {
        min_name_chars: parse_usize("PLANSHEET_MIN_PLAN_NAME_CHARS", "8")?,
        blocked_min_bytes: parse_usize("PLANSHEET_BLOCKED_PAGE_MIN_BYTES", "10000")?,
        ..ExtractionRules::default()
    };
    if let Some(raw) = optional("PLANSHEET_PLAN_KEYWORDS") {
        let keywords = parse_keywords(&raw);
        if keywords.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLANSHEET_PLAN_KEYWORDS".to_string(),
                reason: "keyword list is empty".to_string(),
            });
        }
        rules.keywords = keywords;
    }

    let mail = build_mail_config(&lookup, &read_file)?;

    Ok(AppConfig {
        log_level,
        site_origin,
        search_url,
        session_cookie,
        user_agents,
        request_timeout_secs,
        inter_request_delay_ms,
        inter_request_jitter_ms,
        blocked_retry_backoff_ms,
        max_pages,
        output_dir,
        copy_dir,
        link_label,
        rules,
        mail,
    })
}

/// Builds the mail settings, or `None` when sender, password, or recipients
/// are missing. A missing piece is not an error: the notify step is skipped.
fn build_mail_config<F, R>(lookup: &F, read_file: &R) -> Result<Option<MailConfig>, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    R: Fn(&Path) -> Option<String>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let smtp_port = match optional("EMAIL_SMTP_PORT") {
        Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "EMAIL_SMTP_PORT".to_string(),
            reason: e.to_string(),
        })?,
        None => 465,
    };

    let mut recipients = optional("EMAIL_RECIPIENTS")
        .map(|raw| parse_recipients(&raw))
        .unwrap_or_default();
    if recipients.is_empty() {
        let path = optional("PLANSHEET_RECIPIENTS_FILE")
            .map_or_else(|| PathBuf::from("recipients.txt"), PathBuf::from);
        recipients = read_file(&path)
            .map(|raw| parse_recipients(&raw))
            .unwrap_or_default();
    }

    let (Some(sender), Some(app_password)) =
        (optional("EMAIL_SENDER"), optional("EMAIL_APP_PASSWORD"))
    else {
        return Ok(None);
    };
    if recipients.is_empty() {
        return Ok(None);
    }

    Ok(Some(MailConfig {
        sender,
        app_password,
        smtp_host: optional("EMAIL_SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
        smtp_port,
        recipients,
    }))
}

/// Splits a recipient list on commas, semicolons, and whitespace.
///
/// Duplicates are removed case-insensitively; the first spelling seen is kept
/// and order is preserved.
#[must_use]
pub fn parse_recipients(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn parse_user_agents(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Validates the storefront origin and strips any trailing slash.
fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLANSHEET_SITE_ORIGIN".to_string(),
            reason: format!("\"{raw}\" is not an http(s) origin"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
