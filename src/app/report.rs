use crate::config::OutputFormat;
use crate::core::engine::PriceQuote;
use crate::domain::model::Currency;
use crate::utils::error::{ErrorSeverity, PricingError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteFailure {
    pub plan: String,
    pub currency: Currency,
    pub error: String,
    #[serde(skip)]
    pub severity: ErrorSeverity,
}

impl QuoteFailure {
    pub fn new(plan: &str, currency: Currency, error: &PricingError) -> Self {
        Self {
            plan: plan.to_string(),
            currency,
            error: error.to_string(),
            severity: error.severity(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteReport {
    pub quotes: Vec<PriceQuote>,
    pub failures: Vec<QuoteFailure>,
}

impl QuoteReport {
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty() && self.failures.is_empty()
    }

    pub fn worst_severity(&self) -> Option<ErrorSeverity> {
        self.failures.iter().map(|f| f.severity).max()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Csv => self.render_csv(),
        }
    }

    fn render_text(&self) -> String {
        let mut lines = vec![format!(
            "{:<24} {:<4} {:>12} {:>12}  {}",
            "plan", "cur", "sell", "interval", "price list"
        )];

        for quote in &self.quotes {
            lines.push(format!(
                "{:<24} {:<4} {:>12} {:>12}  {}",
                quote.plan,
                quote.currency.code(),
                quote.sell_price,
                quote.interval_price,
                quote.price_list.as_deref().unwrap_or("(base prices)")
            ));
            for skipped in &quote.skipped_rules {
                lines.push(format!("    skipped '{}': {:?}", skipped.rule, skipped.reason));
            }
        }

        for failure in &self.failures {
            lines.push(format!(
                "{:<24} {:<4} error: {}",
                failure.plan,
                failure.currency.code(),
                failure.error
            ));
        }

        lines.join("\n")
    }

    // 失敗的報價只填 plan、currency 與 error 欄位
    fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "plan",
            "currency",
            "sell_price",
            "interval_price",
            "price_list",
            "applied_rules",
            "skipped_rules",
            "quoted_at",
            "error",
        ])?;

        for quote in &self.quotes {
            let skipped: Vec<&str> = quote.skipped_rules.iter().map(|s| s.rule.as_str()).collect();
            writer.write_record([
                quote.plan.as_str(),
                quote.currency.code(),
                &quote.sell_price.to_string(),
                &quote.interval_price.to_string(),
                quote.price_list.as_deref().unwrap_or(""),
                &quote.applied_rules.join(";"),
                &skipped.join(";"),
                &quote.quoted_at.to_rfc3339(),
                "",
            ])?;
        }

        for failure in &self.failures {
            writer.write_record([
                failure.plan.as_str(),
                failure.currency.code(),
                "",
                "",
                "",
                "",
                "",
                "",
                failure.error.as_str(),
            ])?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| PricingError::IoError(e.into_error()))?;
        String::from_utf8(data)
            .map_err(|e| PricingError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::{SkipReason, SkippedRule};
    use chrono::Utc;

    fn sample_report() -> QuoteReport {
        QuoteReport {
            quotes: vec![PriceQuote {
                plan: "Hair Gel".to_string(),
                currency: Currency::Usd,
                sell_price: 548,
                interval_price: 9,
                price_list: Some("USD default pricelist".to_string()),
                applied_rules: vec!["10% increase price".to_string(), "Two pence off".to_string()],
                skipped_rules: vec![SkippedRule {
                    rule: "100% discount".to_string(),
                    reason: SkipReason::DiscountCodeMismatch,
                }],
                quoted_at: Utc::now(),
            }],
            failures: vec![QuoteFailure::new(
                "Soap",
                Currency::Eur,
                &PricingError::NoMatchingPriceList {
                    plan: "Soap".to_string(),
                    currency: Currency::Eur,
                },
            )],
        }
    }

    #[test]
    fn test_render_text() {
        let text = sample_report().render(OutputFormat::Text).unwrap();

        assert!(text.contains("Hair Gel"));
        assert!(text.contains("548"));
        assert!(text.contains("skipped '100% discount'"));
        assert!(text.contains("No price list for currency EUR on plan 'Soap'"));
    }

    #[test]
    fn test_render_json() {
        let json = sample_report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["quotes"][0]["sell_price"], 548);
        assert_eq!(value["quotes"][0]["currency"], "USD");
        assert_eq!(value["quotes"][0]["skipped_rules"][0]["reason"], "discount_code_mismatch");
        assert_eq!(value["failures"][0]["plan"], "Soap");
    }

    #[test]
    fn test_render_csv() {
        let csv_output = sample_report().render(OutputFormat::Csv).unwrap();
        let mut lines = csv_output.lines();

        assert_eq!(
            lines.next().unwrap(),
            "plan,currency,sell_price,interval_price,price_list,applied_rules,skipped_rules,quoted_at,error"
        );
        assert!(lines
            .next()
            .unwrap()
            .starts_with("Hair Gel,USD,548,9,USD default pricelist,10% increase price;Two pence off,100% discount,"));
        assert_eq!(
            lines.next().unwrap(),
            "Soap,EUR,,,,,,,No price list for currency EUR on plan 'Soap'"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_is_empty() {
        assert!(QuoteReport::default().is_empty());
        assert!(!sample_report().is_empty());
    }

    #[test]
    fn test_worst_severity() {
        assert_eq!(sample_report().worst_severity(), Some(ErrorSeverity::Medium));
        assert_eq!(QuoteReport::default().worst_severity(), None);
    }
}
