use crate::domain::ports::DiscountCodeSource;

/// 模擬 session：固定回傳同一個折扣碼（或沒有折扣碼）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDiscountCode {
    code: Option<String>,
}

impl SessionDiscountCode {
    pub fn new(code: Option<String>) -> Self {
        Self { code }
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl DiscountCodeSource for SessionDiscountCode {
    fn current_discount_code(&self) -> Option<String> {
        self.code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_returns_configured_code() {
        assert_eq!(
            SessionDiscountCode::with_code("xmas").current_discount_code(),
            Some("xmas".to_string())
        );
        assert_eq!(SessionDiscountCode::default().current_discount_code(), None);
    }
}
