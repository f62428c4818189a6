//! Tunable thresholds for plan extraction.
//!
//! The defaults were tuned against one site's markup; they are not
//! algorithmic constants and can be overridden from the environment
//! (see [`crate::config`]).

/// Keywords an offer description must contain (case-insensitive) to be
/// treated as a protection / warranty / service plan.
pub const DEFAULT_PLAN_KEYWORDS: [&str; 9] = [
    "warranty",
    "protection",
    "plan",
    "service",
    "cleaning",
    "installation",
    "year",
    "extended",
    "damage",
];

/// Shortest accepted offer description, in characters.
pub const DEFAULT_MIN_NAME_CHARS: usize = 8;

/// Maximum offers kept per product.
pub const DEFAULT_MAX_OFFERS: usize = 3;

/// Pages smaller than this are treated as blocked or error pages. Real detail
/// pages are several hundred kilobytes.
pub const DEFAULT_BLOCKED_MIN_BYTES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRules {
    /// Lowercased keyword gate.
    pub keywords: Vec<String>,
    pub min_name_chars: usize,
    pub max_offers: usize,
    pub blocked_min_bytes: usize,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_PLAN_KEYWORDS
                .iter()
                .map(|k| (*k).to_owned())
                .collect(),
            min_name_chars: DEFAULT_MIN_NAME_CHARS,
            max_offers: DEFAULT_MAX_OFFERS,
            blocked_min_bytes: DEFAULT_BLOCKED_MIN_BYTES,
        }
    }
}

impl ExtractionRules {
    /// Returns `true` if `name` contains at least one gate keyword.
    #[must_use]
    pub fn has_keyword(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Returns `true` if `name` is long enough to be a real description.
    #[must_use]
    pub fn is_long_enough(&self, name: &str) -> bool {
        name.chars().count() >= self.min_name_chars
    }

    /// Returns `true` if a page body of `len` bytes is too small to be a real
    /// product page.
    #[must_use]
    pub fn looks_blocked(&self, len: usize) -> bool {
        len < self.blocked_min_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keywords_match_case_insensitively() {
        let rules = ExtractionRules::default();
        assert!(rules.has_keyword("2 Year EXTENDED Warranty"));
        assert!(rules.has_keyword("Deep Cleaning Visit"));
        assert!(!rules.has_keyword("Buy 2 get 1 free"));
    }

    #[test]
    fn length_gate_counts_characters() {
        let rules = ExtractionRules::default();
        assert!(!rules.is_long_enough("1 Year"));
        assert!(rules.is_long_enough("1 Year p"));
        // Multi-byte characters count once.
        assert!(!rules.is_long_enough("₹₹₹₹₹₹₹"));
    }

    #[test]
    fn blocked_threshold_is_exclusive() {
        let rules = ExtractionRules::default();
        assert!(rules.looks_blocked(9_999));
        assert!(!rules.looks_blocked(10_000));
    }
}
