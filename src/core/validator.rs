use crate::domain::ports::DiscountCodeSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountCodeCheck {
    Valid,
    Mismatch,
    MissingSource,
}

impl DiscountCodeCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, DiscountCodeCheck::Valid)
    }
}

/// 比對規則要求的折扣碼與目前出示的折扣碼
///
/// 每次呼叫都會重新讀取 source，不做快取。比對區分大小寫且不去除空白；
/// 規則未設定折扣碼且 source 也回傳 `None` 時視為相符。
pub fn check_discount_code(
    expected_code: Option<&str>,
    source: Option<&dyn DiscountCodeSource>,
) -> DiscountCodeCheck {
    let Some(source) = source else {
        return DiscountCodeCheck::MissingSource;
    };

    let presented = source.current_discount_code();
    if presented.as_deref() == expected_code {
        DiscountCodeCheck::Valid
    } else {
        DiscountCodeCheck::Mismatch
    }
}

pub fn is_valid(expected_code: Option<&str>, source: Option<&dyn DiscountCodeSource>) -> bool {
    check_discount_code(expected_code, source).is_valid()
}
