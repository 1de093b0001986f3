// Adapters layer: concrete discount code sources standing in for a real session.

pub mod session;

pub use session::SessionDiscountCode;
