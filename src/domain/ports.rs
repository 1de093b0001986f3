/// 提供目前出示的折扣碼，例如來自 session
pub trait DiscountCodeSource: Send + Sync {
    fn current_discount_code(&self) -> Option<String>;
}

impl<F> DiscountCodeSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_discount_code(&self) -> Option<String> {
        self()
    }
}
