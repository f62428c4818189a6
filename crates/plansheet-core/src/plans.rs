use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductSummary;

/// Number of plan slots in every report row, regardless of how many offers
/// were found for the product.
pub const PLAN_SLOTS: usize = 3;

/// Header labels of the exported sheet, in column order.
pub const REPORT_COLUMNS: [&str; 8 + PLAN_SLOTS * 3] = [
    "ASIN",
    "Product Name",
    "Current Price",
    "MRP",
    "Discount %",
    "Rating",
    "Number of Reviews",
    "Product Link",
    "Plan 1 Name",
    "Plan 1 Price",
    "Plan 1 Brand",
    "Plan 2 Name",
    "Plan 2 Price",
    "Plan 2 Brand",
    "Plan 3 Name",
    "Plan 3 Price",
    "Plan 3 Brand",
];

/// Index of the "Product Link" column in [`REPORT_COLUMNS`].
pub const LINK_COLUMN: usize = 7;

/// Company underwriting or fulfilling a protection plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanBrand {
    #[serde(rename = "Acko")]
    Acko,
    #[serde(rename = "Onsitego")]
    Onsitego,
    #[serde(rename = "One Assist")]
    OneAssist,
    #[serde(rename = "Zopper India")]
    ZopperIndia,
    #[serde(rename = "Servify")]
    Servify,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl PlanBrand {
    /// Display label written to the report.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlanBrand::Acko => "Acko",
            PlanBrand::Onsitego => "Onsitego",
            PlanBrand::OneAssist => "One Assist",
            PlanBrand::ZopperIndia => "Zopper India",
            PlanBrand::Servify => "Servify",
            PlanBrand::Unknown => "Unknown",
        }
    }

    /// Inverse of [`PlanBrand::label`]. Unrecognized labels map to
    /// [`PlanBrand::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Acko" => PlanBrand::Acko,
            "Onsitego" => PlanBrand::Onsitego,
            "One Assist" => PlanBrand::OneAssist,
            "Zopper India" => PlanBrand::ZopperIndia,
            "Servify" => PlanBrand::Servify,
            _ => PlanBrand::Unknown,
        }
    }
}

impl std::fmt::Display for PlanBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A protection / warranty / service add-on advertised on a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOffer {
    /// Offer description, trimmed with internal whitespace collapsed.
    pub name: String,
    /// Advertised price; `None` when the captured amount did not parse.
    pub price: Option<Decimal>,
    pub brand: PlanBrand,
}

/// One exported row: a listing summary plus exactly [`PLAN_SLOTS`] plan slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReport {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub plans: [Option<PlanOffer>; PLAN_SLOTS],
}

impl ProductReport {
    /// Zips a summary with its offers. Offers beyond [`PLAN_SLOTS`] are
    /// dropped in order; missing slots are `None`.
    #[must_use]
    pub fn assemble(summary: ProductSummary, offers: Vec<PlanOffer>) -> Self {
        let mut plans: [Option<PlanOffer>; PLAN_SLOTS] = Default::default();
        for (slot, offer) in plans.iter_mut().zip(offers) {
            *slot = Some(offer);
        }
        Self { summary, plans }
    }

    /// Number of filled plan slots.
    #[must_use]
    pub fn plan_count(&self) -> usize {
        self.plans.iter().filter(|p| p.is_some()).count()
    }

    /// Returns `true` if at least one plan slot is filled.
    #[must_use]
    pub fn has_plans(&self) -> bool {
        self.plans.iter().any(Option::is_some)
    }
}
