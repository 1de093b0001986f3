pub mod catalog;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "plan-pricing")]
#[command(about = "Price subscription plans from a TOML catalog")]
pub struct CliConfig {
    /// Path to the TOML catalog
    #[arg(short, long, default_value = "pricing-catalog.toml")]
    pub catalog: String,

    /// Plan to price (all plans when omitted)
    #[arg(short, long)]
    pub plan: Option<String>,

    /// Currency code (every supported currency when omitted)
    #[arg(long)]
    pub currency: Option<String>,

    /// Discount code presented by the session, overrides the catalog
    #[arg(long, conflicts_with = "no_session")]
    pub discount_code: Option<String>,

    /// Price without any discount code source
    #[arg(long)]
    pub no_session: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
