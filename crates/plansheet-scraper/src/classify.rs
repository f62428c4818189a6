//! Provider classification for plan offers.
//!
//! An ordered rule table evaluated first-match-wins. Named providers come
//! before the generic default, so a description that names a provider is
//! always attributed to it even when it also says "warranty" or "protection".

use plansheet_core::PlanBrand;

/// Provider assumed for a generic warranty/protection offer that does not
/// name who underwrites it.
pub const DEFAULT_PROVIDER: PlanBrand = PlanBrand::ZopperIndia;

enum Predicate {
    /// Lowercased description contains any of the needles.
    Mentions(&'static [&'static str]),
    /// Lowercased description contains any of the needles and has no
    /// standalone word "by" (no "... by <provider>" qualifier).
    UnattributedMention(&'static [&'static str]),
}

impl Predicate {
    fn matches(&self, lower: &str) -> bool {
        match self {
            Predicate::Mentions(needles) => needles.iter().any(|n| lower.contains(n)),
            Predicate::UnattributedMention(needles) => {
                needles.iter().any(|n| lower.contains(n)) && !has_by_qualifier(lower)
            }
        }
    }
}

const BRAND_RULES: [(Predicate, PlanBrand); 6] = [
    (Predicate::Mentions(&["acko"]), PlanBrand::Acko),
    (Predicate::Mentions(&["onsitego"]), PlanBrand::Onsitego),
    (
        Predicate::Mentions(&["one assist", "oneassist"]),
        PlanBrand::OneAssist,
    ),
    (Predicate::Mentions(&["zopper"]), PlanBrand::ZopperIndia),
    (Predicate::Mentions(&["servify"]), PlanBrand::Servify),
    (
        Predicate::UnattributedMention(&["warranty", "protection"]),
        DEFAULT_PROVIDER,
    ),
];

/// Assigns a provider to an offer description.
#[must_use]
pub fn classify_brand(description: &str) -> PlanBrand {
    let lower = description.to_lowercase();
    BRAND_RULES
        .iter()
        .find(|(predicate, _)| predicate.matches(&lower))
        .map_or(PlanBrand::Unknown, |(_, brand)| *brand)
}

fn has_by_qualifier(lower: &str) -> bool {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "by")
}
