use thiserror::Error;

use crate::domain::model::Currency;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("No price list for currency {currency} on plan '{plan}'")]
    NoMatchingPriceList { plan: String, currency: Currency },

    #[error("Plan not found: {name}")]
    PlanNotFound { name: String },

    #[error("Unknown currency code: {value}")]
    UnknownCurrency { value: String },

    #[error("{kind} '{name}' is referenced by '{referenced_by}' but never declared")]
    UnknownReference {
        kind: String,
        name: String,
        referenced_by: String,
    },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: String, name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Pricing,
    Catalog,
    Configuration,
    Io,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PricingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::NoMatchingPriceList { .. } => ErrorCategory::Pricing,
            PricingError::PlanNotFound { .. }
            | PricingError::UnknownReference { .. }
            | PricingError::DuplicateName { .. } => ErrorCategory::Catalog,
            PricingError::UnknownCurrency { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PricingError::IoError(_) => ErrorCategory::Io,
            PricingError::SerializationError(_) | PricingError::CsvError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一方案缺少該幣別價格表，其他報價仍然有效
            ErrorCategory::Pricing => ErrorSeverity::Medium,
            ErrorCategory::Catalog | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PricingError::NoMatchingPriceList { currency, .. } => format!(
                "Add a {} price list to the plan, or set pricing.on_unmatched_currency = \"base_price\"",
                currency
            ),
            PricingError::PlanNotFound { .. } => {
                "Check the plan name against the [[plans]] entries in the catalog".to_string()
            }
            PricingError::UnknownCurrency { .. } => {
                format!("Use one of: {}", Currency::codes().join(", "))
            }
            PricingError::UnknownReference { kind, .. } => {
                format!("Declare the {} in the catalog or fix the reference", kind)
            }
            PricingError::DuplicateName { kind, .. } => {
                format!("Give every {} a unique name", kind)
            }
            PricingError::IoError(_) => {
                "Make sure the catalog file exists and is readable".to_string()
            }
            PricingError::SerializationError(_) | PricingError::CsvError(_) => {
                "Try a different --format".to_string()
            }
            PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. } => {
                "Fix the catalog TOML and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Pricing => format!("Could not price plan: {}", self),
            ErrorCategory::Catalog => format!("Catalog problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("Could not read input: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
