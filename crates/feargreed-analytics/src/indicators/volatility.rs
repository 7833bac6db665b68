//! 변동성 지표 (Volatility Indicators).
//!
//! - 구간별 단순 수익률
//! - 수익률의 모표준편차

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{IndicatorError, IndicatorResult};

/// 변동성 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 구간별 단순 수익률.
    ///
    /// r[i] = (P[i] - P[i-1]) / P[i-1], i = 1..n-1
    ///
    /// # 반환
    /// 길이 n-1의 수익률 목록
    pub fn returns(&self, prices: &[Decimal]) -> IndicatorResult<Vec<Decimal>> {
        if prices.len() < 2 {
            return Err(IndicatorError::InsufficientData {
                required: 2,
                provided: prices.len(),
            });
        }

        prices
            .windows(2)
            .map(|w| {
                if w[0] <= Decimal::ZERO {
                    return Err(IndicatorError::InvalidParameter(format!(
                        "가격은 0보다 커야 합니다: {}",
                        w[0]
                    )));
                }
                (w[1] - w[0]).checked_div(w[0]).ok_or_else(|| {
                    IndicatorError::CalculationError("수익률 계산 실패".to_string())
                })
            })
            .collect()
    }

    /// 수익률 변동성 (모표준편차).
    ///
    /// σ = sqrt(Σ(r - r̄)² / N)
    ///
    /// 분산까지는 Decimal로 계산하고 제곱근만 `f64`로 구합니다.
    pub fn return_volatility(&self, prices: &[Decimal]) -> IndicatorResult<f64> {
        let returns = self.returns(prices)?;
        let n = Decimal::from(returns.len());

        let overflow = || IndicatorError::CalculationError("변동성 계산 오버플로".to_string());

        let mean = returns
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(*r))
            .and_then(|sum| sum.checked_div(n))
            .ok_or_else(overflow)?;
        let variance = returns
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| {
                let diff = r.checked_sub(mean)?;
                acc.checked_add(diff.checked_mul(diff)?)
            })
            .and_then(|sum| sum.checked_div(n))
            .ok_or_else(overflow)?;

        variance
            .to_f64()
            .map(f64::sqrt)
            .filter(|v| v.is_finite())
            .ok_or_else(|| IndicatorError::CalculationError("분산 변환 실패".to_string()))
    }
}
