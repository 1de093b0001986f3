use crate::app::report::{QuoteFailure, QuoteReport};
use crate::config::catalog::CatalogConfig;
use crate::domain::model::{Currency, Plan};
use crate::domain::ports::DiscountCodeSource;
use crate::utils::error::{PricingError, Result};

/// 報價請求：未指定方案或幣別時涵蓋全部
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub plan: Option<String>,
    pub currency: Option<Currency>,
}

/// 未指定幣別時使用方案價格表上的幣別；沒有價格表則嘗試全部幣別
fn currencies_for(plan: &Plan, requested: Option<Currency>) -> Vec<Currency> {
    if let Some(currency) = requested {
        return vec![currency];
    }
    if plan.price_lists.is_empty() {
        return Currency::ALL.to_vec();
    }

    let mut currencies = Vec::new();
    for price_list in &plan.price_lists {
        if !currencies.contains(&price_list.currency) {
            currencies.push(price_list.currency);
        }
    }
    currencies
}

/// 依目錄計算報價；價格錯誤記錄為失敗，設定錯誤則直接回傳
pub fn quote_catalog(
    catalog: &CatalogConfig,
    request: &QuoteRequest,
    source: Option<&dyn DiscountCodeSource>,
) -> Result<QuoteReport> {
    let plans: Vec<Plan> = match &request.plan {
        Some(name) => vec![catalog.plan(name)?],
        None => catalog.plans()?,
    };
    let engine = catalog.engine();
    let mut report = QuoteReport::default();

    for plan in &plans {
        for currency in currencies_for(plan, request.currency) {
            match engine.quote(plan, currency, source) {
                Ok(quote) => report.quotes.push(quote),
                Err(e @ PricingError::NoMatchingPriceList { .. }) => {
                    tracing::warn!("{}", e);
                    report.failures.push(QuoteFailure::new(&plan.name, currency, &e));
                }
                Err(e) => return Err(e),
            }
        }
    }

    tracing::info!(
        "Quoted {} plan(s): {} quote(s), {} failure(s)",
        plans.len(),
        report.quotes.len(),
        report.failures.len()
    );

    Ok(report)
}
