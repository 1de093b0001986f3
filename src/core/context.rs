use crate::domain::ports::DiscountCodeSource;
use std::fmt;

/// 單次計價使用的上下文，每次計價重新建立
#[derive(Clone, Copy, Default)]
pub struct PricingContext<'a> {
    discount_code_source: Option<&'a dyn DiscountCodeSource>,
}

impl<'a> PricingContext<'a> {
    pub fn new(source: &'a dyn DiscountCodeSource) -> Self {
        Self {
            discount_code_source: Some(source),
        }
    }

    /// A context with no discount code source. Gated rules are always skipped.
    pub fn without_discount_codes() -> Self {
        Self::default()
    }

    pub fn from_option(source: Option<&'a dyn DiscountCodeSource>) -> Self {
        Self {
            discount_code_source: source,
        }
    }

    pub fn discount_code_source(&self) -> Option<&'a dyn DiscountCodeSource> {
        self.discount_code_source
    }
}

impl fmt::Debug for PricingContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingContext")
            .field("has_discount_code_source", &self.discount_code_source.is_some())
            .finish()
    }
}
