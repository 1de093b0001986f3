use crate::adapters::SessionDiscountCode;
use crate::core::engine::PricingEngine;
use crate::core::selector::UnmatchedCurrencyPolicy;
use crate::domain::model::{Currency, Plan, PriceList, Rule};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{validate_unique_names, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 價格目錄：規則、價格表與方案皆以名稱互相引用
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub price_lists: Vec<PriceListConfig>,
    #[serde(default)]
    pub plans: Vec<PlanConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default)]
    pub on_unmatched_currency: UnmatchedCurrencyPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceListConfig {
    pub name: String,
    pub currency: Currency,
    #[serde(default)]
    pub rules: Vec<String>, // 規則名稱，依序套用
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub name: String,
    pub sell_price: i64,
    pub interval_price: i64,
    pub price_lists: Option<Vec<String>>, // 未設定或空陣列都代表使用原價
}

impl CatalogConfig {
    /// 從 TOML 檔案載入目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PricingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PricingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DISCOUNT_CODE})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PricingError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_unique_names("rule", "rules.name", self.rules.iter().map(|r| r.name.as_str()))?;
        validate_unique_names(
            "price list",
            "price_lists.name",
            self.price_lists.iter().map(|pl| pl.name.as_str()),
        )?;
        validate_unique_names("plan", "plans.name", self.plans.iter().map(|p| p.name.as_str()))?;

        for price_list in &self.price_lists {
            for rule_name in &price_list.rules {
                if !self.rules.iter().any(|rule| &rule.name == rule_name) {
                    return Err(PricingError::UnknownReference {
                        kind: "rule".to_string(),
                        name: rule_name.clone(),
                        referenced_by: price_list.name.clone(),
                    });
                }
            }
        }

        for plan in &self.plans {
            for list_name in plan.price_lists.iter().flatten() {
                if !self.price_lists.iter().any(|pl| &pl.name == list_name) {
                    return Err(PricingError::UnknownReference {
                        kind: "price list".to_string(),
                        name: list_name.clone(),
                        referenced_by: plan.name.clone(),
                    });
                }
            }
        }

        for rule in &self.rules {
            if rule.requires_discount_code && rule.discount_code.is_none() {
                tracing::warn!(
                    "Rule '{}' requires a discount code but declares none; it only applies when no code is presented",
                    rule.name
                );
            }
        }

        Ok(())
    }

    /// 將名稱引用展開為完整的方案
    pub fn plans(&self) -> Result<Vec<Plan>> {
        let rules: HashMap<&str, &Rule> = self.rules.iter().map(|r| (r.name.as_str(), r)).collect();

        let mut price_lists: HashMap<&str, PriceList> = HashMap::new();
        for config in &self.price_lists {
            let resolved = config
                .rules
                .iter()
                .map(|name| {
                    rules.get(name.as_str()).map(|rule| (*rule).clone()).ok_or_else(|| {
                        PricingError::UnknownReference {
                            kind: "rule".to_string(),
                            name: name.clone(),
                            referenced_by: config.name.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            price_lists.insert(
                config.name.as_str(),
                PriceList::new(config.name.clone(), config.currency, resolved),
            );
        }

        self.plans
            .iter()
            .map(|config| {
                let lists = config
                    .price_lists
                    .iter()
                    .flatten()
                    .map(|name| {
                        price_lists.get(name.as_str()).cloned().ok_or_else(|| {
                            PricingError::UnknownReference {
                                kind: "price list".to_string(),
                                name: name.clone(),
                                referenced_by: config.name.clone(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Plan::new(config.name.clone(), config.sell_price, config.interval_price)
                    .with_price_lists(lists))
            })
            .collect()
    }

    pub fn plan(&self, name: &str) -> Result<Plan> {
        self.plans()?
            .into_iter()
            .find(|plan| plan.name == name)
            .ok_or_else(|| PricingError::PlanNotFound {
                name: name.to_string(),
            })
    }

    pub fn engine(&self) -> PricingEngine {
        PricingEngine::with_policy(self.pricing.on_unmatched_currency)
    }

    pub fn session(&self) -> SessionDiscountCode {
        SessionDiscountCode::new(self.session.discount_code.clone())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
