use crate::core::context::PricingContext;
use crate::core::evaluator::SkippedRule;
use crate::core::selector::{select_price, UnmatchedCurrencyPolicy};
use crate::domain::model::{Currency, Plan, PricePair};
use crate::domain::ports::DiscountCodeSource;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 單一方案在某幣別下的計價結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub plan: String,
    pub currency: Currency,
    pub sell_price: i64,
    pub interval_price: i64,
    pub price_list: Option<String>,
    pub applied_rules: Vec<String>,
    pub skipped_rules: Vec<SkippedRule>,
    pub quoted_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn prices(&self) -> PricePair {
        PricePair::new(self.sell_price, self.interval_price)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    policy: UnmatchedCurrencyPolicy,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UnmatchedCurrencyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnmatchedCurrencyPolicy {
        self.policy
    }

    pub fn price(
        &self,
        plan: &Plan,
        currency: Currency,
        source: Option<&dyn DiscountCodeSource>,
    ) -> Result<PricePair> {
        self.quote(plan, currency, source).map(|quote| quote.prices())
    }

    pub fn quote(
        &self,
        plan: &Plan,
        currency: Currency,
        source: Option<&dyn DiscountCodeSource>,
    ) -> Result<PriceQuote> {
        let context = PricingContext::from_option(source);
        let selection = select_price(plan, currency, &context, self.policy)?;
        let evaluation = selection.evaluation;

        tracing::info!(
            "Priced '{}' in {}: sell {}, interval {}",
            plan.name,
            currency,
            evaluation.prices.sell_price,
            evaluation.prices.interval_price
        );

        Ok(PriceQuote {
            plan: plan.name.clone(),
            currency,
            sell_price: evaluation.prices.sell_price,
            interval_price: evaluation.prices.interval_price,
            price_list: selection.price_list,
            applied_rules: evaluation.applied_rules,
            skipped_rules: evaluation.skipped_rules,
            quoted_at: Utc::now(),
        })
    }
}

/// 以預設策略計價，找不到幣別價格表時回傳錯誤
pub fn compute_price(
    plan: &Plan,
    currency: Currency,
    source: Option<&dyn DiscountCodeSource>,
) -> Result<PricePair> {
    PricingEngine::new().price(plan, currency, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::SkipReason;
    use crate::domain::model::{PriceList, Rule};

    fn xmas() -> Option<String> {
        Some("xmas".to_string())
    }

    fn plan() -> Plan {
        let gated = Rule {
            requires_discount_code: true,
            discount_code: Some("xmas".to_string()),
            percent_discount: 100,
            ..Rule::for_both_prices("100% discount")
        };
        Plan::new("Hair Gel", 500, 10)
            .with_price_lists(vec![PriceList::new("GBP default pricelist", Currency::Gbp, vec![gated])])
    }

    #[test]
    fn test_quote_reports_applied_rules() {
        let quote = PricingEngine::new().quote(&plan(), Currency::Gbp, Some(&xmas)).unwrap();

        assert_eq!(quote.prices(), PricePair::new(0, 0));
        assert_eq!(quote.price_list.as_deref(), Some("GBP default pricelist"));
        assert_eq!(quote.applied_rules, vec!["100% discount".to_string()]);
    }

    #[test]
    fn test_quote_without_source_skips_gated_rule() {
        let quote = PricingEngine::new().quote(&plan(), Currency::Gbp, None).unwrap();

        assert_eq!(quote.prices(), PricePair::new(500, 10));
        assert_eq!(quote.skipped_rules[0].reason, SkipReason::MissingDiscountValidator);
    }

    #[test]
    fn test_engine_policy_is_applied() {
        let engine = PricingEngine::with_policy(UnmatchedCurrencyPolicy::BasePrice);

        assert_eq!(
            engine.price(&plan(), Currency::Usd, None).unwrap(),
            PricePair::new(500, 10)
        );
        assert!(compute_price(&plan(), Currency::Usd, None).is_err());
    }
}
