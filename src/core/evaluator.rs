use crate::core::context::PricingContext;
use crate::core::validator::{check_discount_code, DiscountCodeCheck};
use crate::domain::model::{Plan, PricePair, Rule};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    DiscountCodeMismatch,
    MissingDiscountValidator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRule {
    pub rule: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvaluation {
    pub prices: PricePair,
    pub applied_rules: Vec<String>,
    pub skipped_rules: Vec<SkippedRule>,
}

/// `base * percent / 100`，整數除法向零截斷
///
/// 乘法以 i128 計算，結果超出 i64 時取邊界值。
pub fn percent_of(base: i64, percent: i64) -> i64 {
    let amount = i128::from(base) * i128::from(percent) / 100;
    i64::try_from(amount).unwrap_or(if amount < 0 { i64::MIN } else { i64::MAX })
}

fn apply_percent_increase(base: i64, percent_increase: i64) -> i64 {
    base.saturating_add(percent_of(base, percent_increase))
}

fn apply_percent_discount(base: i64, percent_discount: i64) -> i64 {
    base.saturating_sub(percent_of(base, percent_discount))
}

fn apply_amounts(price: i64, rule: &Rule) -> i64 {
    price
        .saturating_sub(rule.amount_decrease)
        .saturating_add(rule.amount_increase)
}

fn adjust_sell_price(sell_price: i64, rule: &Rule) -> i64 {
    let price = apply_percent_increase(sell_price, rule.percent_increase);
    apply_amounts(apply_percent_discount(price, rule.percent_discount), rule)
}

// 百分比加價以方案原始週期價格為基準，而非累計值
fn adjust_interval_price(interval_price: i64, base_interval_price: i64, rule: &Rule) -> i64 {
    let mut price = interval_price;
    if rule.percent_increase != 0 {
        price = apply_percent_increase(base_interval_price, rule.percent_increase);
    }
    if rule.percent_discount != 0 {
        price = apply_percent_discount(price, rule.percent_discount);
    }
    apply_amounts(price, rule)
}

/// 依序套用規則並記錄每條規則是否生效
pub fn evaluate_rules(plan: &Plan, rules: &[Rule], context: &PricingContext<'_>) -> RuleEvaluation {
    let mut sell_price = plan.sell_price;
    let mut interval_price = plan.interval_price;
    let mut applied_rules = Vec::new();
    let mut skipped_rules = Vec::new();

    tracing::debug!(
        "Applying {} rules to plan '{}' (sell: {}, interval: {})",
        rules.len(),
        plan.name,
        sell_price,
        interval_price
    );

    for rule in rules {
        if rule.requires_discount_code {
            let check = check_discount_code(
                rule.discount_code.as_deref(),
                context.discount_code_source(),
            );

            let reason = match check {
                DiscountCodeCheck::Valid => None,
                DiscountCodeCheck::Mismatch => Some(SkipReason::DiscountCodeMismatch),
                DiscountCodeCheck::MissingSource => Some(SkipReason::MissingDiscountValidator),
            };

            if let Some(reason) = reason {
                tracing::debug!("Skipping rule '{}': {:?}", rule.name, reason);
                skipped_rules.push(SkippedRule {
                    rule: rule.name.clone(),
                    reason,
                });
                continue;
            }
        }

        if rule.affects_sell_price {
            sell_price = adjust_sell_price(sell_price, rule);
        }

        if rule.affects_interval_price {
            interval_price = adjust_interval_price(interval_price, plan.interval_price, rule);
        }

        tracing::debug!(
            "After rule '{}': sell: {}, interval: {}",
            rule.name,
            sell_price,
            interval_price
        );
        applied_rules.push(rule.name.clone());
    }

    RuleEvaluation {
        prices: PricePair::new(sell_price, interval_price),
        applied_rules,
        skipped_rules,
    }
}

pub fn apply_rules(plan: &Plan, rules: &[Rule], context: &PricingContext<'_>) -> PricePair {
    evaluate_rules(plan, rules, context).prices
}
