pub mod context;
pub mod engine;
pub mod evaluator;
pub mod selector;
pub mod validator;

pub use crate::domain::model::{Currency, Plan, PriceList, PricePair, Rule};
pub use crate::domain::ports::DiscountCodeSource;
pub use crate::utils::error::Result;
