//! Shared data model and configuration for the plansheet workspace.

pub mod app_config;
pub mod config;
pub mod plans;
pub mod products;
pub mod rules;

use thiserror::Error;

pub use app_config::{AppConfig, MailConfig};
pub use config::{load_app_config, load_app_config_from_env, parse_recipients};
pub use plans::{PlanBrand, PlanOffer, ProductReport, LINK_COLUMN, PLAN_SLOTS, REPORT_COLUMNS};
pub use products::{canonical_link, or_sentinel, ProductSummary, NOT_AVAILABLE};
pub use rules::ExtractionRules;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
