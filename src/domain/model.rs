use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::PricingError;

/// 支援的幣別代碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Gbp,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Gbp, Currency::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
        }
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(Currency::code).collect()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PricingError;

    // 大小寫必須完全一致，與價格表比對規則相同
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|currency| currency.code() == s)
            .ok_or_else(|| PricingError::UnknownCurrency {
                value: s.to_string(),
            })
    }
}

/// 單一價格調整規則，可選擇以折扣碼作為啟用條件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub name: String,
    pub affects_sell_price: bool,
    pub affects_interval_price: bool,
    pub percent_increase: i64,
    pub percent_discount: i64,
    pub amount_decrease: i64,
    pub amount_increase: i64,
    pub requires_discount_code: bool,
    pub discount_code: Option<String>,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Applies to both sell and interval price.
    pub fn for_both_prices(name: impl Into<String>) -> Self {
        Self {
            affects_sell_price: true,
            affects_interval_price: true,
            ..Self::new(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub name: String,
    pub currency: Currency,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl PriceList {
    pub fn new(name: impl Into<String>, currency: Currency, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            currency,
            rules,
        }
    }
}

/// 可販售的方案；金額以最小貨幣單位表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub sell_price: i64,
    pub interval_price: i64,
    #[serde(default)]
    pub price_lists: Vec<PriceList>,
}

impl Plan {
    pub fn new(name: impl Into<String>, sell_price: i64, interval_price: i64) -> Self {
        Self {
            name: name.into(),
            sell_price,
            interval_price,
            price_lists: Vec::new(),
        }
    }

    pub fn with_price_lists(mut self, price_lists: Vec<PriceList>) -> Self {
        self.price_lists = price_lists;
        self
    }

    pub fn base_prices(&self) -> PricePair {
        PricePair::new(self.sell_price, self.interval_price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePair {
    pub sell_price: i64,
    pub interval_price: i64,
}

impl PricePair {
    pub fn new(sell_price: i64, interval_price: i64) -> Self {
        Self {
            sell_price,
            interval_price,
        }
    }
}

impl From<PricePair> for (i64, i64) {
    fn from(pair: PricePair) -> Self {
        (pair.sell_price, pair.interval_price)
    }
}
