//! 추세 지표 (Trend Indicators).
//!
//! - SMA (전체 구간 단순 평균)
//! - 모멘텀 (최신가의 SMA 대비 편차)

use rust_decimal::Decimal;

use super::{IndicatorError, IndicatorResult};

/// 추세 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 전체 구간 단순 평균.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// 롤링 윈도우가 아니라 주어진 가격 전체의 평균 하나를 반환합니다.
    pub fn sma(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        if prices.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let sum = prices
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(*p))
            .ok_or_else(|| IndicatorError::CalculationError("가격 합계 오버플로".to_string()))?;

        sum.checked_div(Decimal::from(prices.len()))
            .ok_or_else(|| IndicatorError::CalculationError("평균 계산 실패".to_string()))
    }

    /// 모멘텀 = (최신가 - SMA) / SMA.
    ///
    /// # 인자
    /// * `latest` - 최신 가격
    /// * `sma` - 기준 평균
    pub fn momentum(&self, latest: Decimal, sma: Decimal) -> IndicatorResult<Decimal> {
        if sma.is_zero() {
            return Err(IndicatorError::InvalidParameter(
                "평균 가격이 0이면 모멘텀을 계산할 수 없습니다".to_string(),
            ));
        }

        (latest - sma)
            .checked_div(sma)
            .ok_or_else(|| IndicatorError::CalculationError("모멘텀 계산 실패".to_string()))
    }
}
