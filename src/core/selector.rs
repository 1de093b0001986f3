use crate::core::context::PricingContext;
use crate::core::evaluator::{evaluate_rules, RuleEvaluation};
use crate::domain::model::{Currency, Plan, PricePair};
use crate::utils::error::{PricingError, Result};
use serde::{Deserialize, Serialize};

/// 方案有價格表但沒有符合幣別時的處理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedCurrencyPolicy {
    #[default]
    Error,
    BasePrice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSelection {
    /// Name of the price list whose result was kept, if any.
    pub price_list: Option<String>,
    pub evaluation: RuleEvaluation,
}

impl PriceSelection {
    fn base(plan: &Plan) -> Self {
        Self {
            price_list: None,
            evaluation: RuleEvaluation {
                prices: plan.base_prices(),
                applied_rules: Vec::new(),
                skipped_rules: Vec::new(),
            },
        }
    }
}

pub fn select_price(
    plan: &Plan,
    currency: Currency,
    context: &PricingContext<'_>,
    policy: UnmatchedCurrencyPolicy,
) -> Result<PriceSelection> {
    tracing::debug!("Selecting price list for plan '{}' in {}", plan.name, currency);

    if plan.price_lists.is_empty() {
        tracing::debug!(
            "Plan '{}' has no price lists, using base prices (sell: {}, interval: {})",
            plan.name,
            plan.sell_price,
            plan.interval_price
        );
        return Ok(PriceSelection::base(plan));
    }

    let mut selection = None;
    let mut matches = 0usize;

    // 同幣別有多個價格表時每個都會計算，保留最後一個結果
    for price_list in plan.price_lists.iter().filter(|pl| pl.currency == currency) {
        matches += 1;
        tracing::debug!("Using price list '{}'", price_list.name);

        let evaluation = evaluate_rules(plan, &price_list.rules, context);
        selection = Some(PriceSelection {
            price_list: Some(price_list.name.clone()),
            evaluation,
        });
    }

    if matches > 1 {
        tracing::warn!(
            "Plan '{}' has {} price lists for {}, keeping the last one",
            plan.name,
            matches,
            currency
        );
    }

    match (selection, policy) {
        (Some(selection), _) => Ok(selection),
        (None, UnmatchedCurrencyPolicy::Error) => Err(PricingError::NoMatchingPriceList {
            plan: plan.name.clone(),
            currency,
        }),
        (None, UnmatchedCurrencyPolicy::BasePrice) => {
            tracing::warn!(
                "Plan '{}' has no {} price list, falling back to base prices",
                plan.name,
                currency
            );
            Ok(PriceSelection::base(plan))
        }
    }
}

pub fn get_price(
    plan: &Plan,
    currency: Currency,
    context: &PricingContext<'_>,
    policy: UnmatchedCurrencyPolicy,
) -> Result<PricePair> {
    select_price(plan, currency, context, policy).map(|selection| selection.evaluation.prices)
}
