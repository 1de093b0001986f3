pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::SessionDiscountCode;
pub use crate::app::quoting::{quote_catalog, QuoteRequest};
pub use crate::app::report::QuoteReport;
pub use crate::config::{catalog::CatalogConfig, OutputFormat};
pub use crate::core::context::PricingContext;
pub use crate::core::engine::{compute_price, PriceQuote, PricingEngine};
pub use crate::core::selector::UnmatchedCurrencyPolicy;
pub use crate::domain::model::{Currency, Plan, PriceList, PricePair, Rule};
pub use crate::domain::ports::DiscountCodeSource;
pub use crate::utils::error::{PricingError, Result};
