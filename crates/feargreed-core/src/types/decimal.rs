//! 정밀한 가격 계산을 위한 Decimal 유틸리티.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// 가격 정밀도를 위한 타입.
pub type Price = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다. 0은 양수가 아닙니다.
    fn is_strictly_positive(&self) -> bool;

    /// `f64`로 변환합니다. 표현할 수 없으면 `None`.
    fn to_f64_checked(&self) -> Option<f64>;
}

impl DecimalExt for Decimal {
    fn is_strictly_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn to_f64_checked(&self) -> Option<f64> {
        self.to_f64().filter(|v| v.is_finite())
    }
}

/// 외부 API의 부동소수점 가격을 Decimal로 변환합니다.
///
/// NaN, 무한대, Decimal 범위를 벗어나는 값은 `None`을 반환합니다.
pub fn price_from_f64(value: f64) -> Option<Price> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}
