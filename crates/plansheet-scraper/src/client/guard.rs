//! Recognises challenge and error pages served in place of real content.

use crate::error::ScraperError;

/// Lowercased phrases that only appear on bot-check pages.
const CHALLENGE_MARKERS: [&str; 4] = [
    "validatecaptcha",
    "enter the characters you see",
    "robot check",
    "sorry, we just need to make sure you",
];

/// Returns [`ScraperError::Blocked`] if `body` is shorter than `min_bytes` or
/// carries a challenge marker.
pub(crate) fn check_page(url: &str, body: &str, min_bytes: usize) -> Result<(), ScraperError> {
    if body.len() < min_bytes {
        return Err(ScraperError::Blocked {
            url: url.to_owned(),
            reason: format!("page is {} bytes, expected at least {min_bytes}", body.len()),
        });
    }

    let lower = body.to_lowercase();
    if let Some(marker) = CHALLENGE_MARKERS.iter().find(|m| lower.contains(*m)) {
        return Err(ScraperError::Blocked {
            url: url.to_owned(),
            reason: format!("challenge marker \"{marker}\""),
        });
    }

    Ok(())
}
