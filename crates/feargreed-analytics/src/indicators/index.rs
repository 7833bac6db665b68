//! 공포/탐욕 지수 계산기.
//!
//! 단일 요인(모멘텀) 모델입니다:
//!
//! ```text
//! sma       = mean(P[0..n])
//! momentum  = (P[n-1] - sma) / sma
//! raw       = 50 + momentum × 100
//! score     = clamp(floor(raw), 0, 100)
//! ```
//!
//! 수익률 변동성도 함께 계산하지만 점수에는 반영하지 않습니다.

use feargreed_core::{PriceSeries, MAX_SCORE};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::trend::TrendIndicators;
use super::volatility::VolatilityIndicators;
use super::{IndicatorError, IndicatorResult};

/// 모멘텀이 0일 때의 기준 점수.
const BASE_SCORE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// 모멘텀을 점수로 환산하는 배율.
const MOMENTUM_SCALE: Decimal = Decimal::ONE_HUNDRED;

/// 지수 계산에 필요한 최소 포인트 수.
const MIN_POINTS: usize = 2;

/// 지수 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexReading {
    /// 0~100 점수
    pub score: u8,
    /// 수익률 모표준편차 (진단용, 점수 미반영)
    pub volatility: f64,
    /// 전체 구간 평균 가격
    pub sma: Decimal,
    /// SMA 대비 최신가 편차
    pub momentum: Decimal,
}

/// 가격 시계열을 0~100 점수로 변환하는 순수 계산기.
///
/// 같은 시계열에 대해 항상 같은 결과를 반환합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexCalculator {
    trend: TrendIndicators,
    volatility: VolatilityIndicators,
}

impl IndexCalculator {
    /// 새로운 지수 계산기 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열에서 지수를 계산합니다.
    ///
    /// # 에러
    /// - 포인트가 2개 미만이면 `InsufficientData`
    /// - 0 이하 가격이 있으면 `InvalidParameter`
    pub fn compute(&self, series: &PriceSeries) -> IndicatorResult<IndexReading> {
        if series.len() < MIN_POINTS {
            return Err(IndicatorError::InsufficientData {
                required: MIN_POINTS,
                provided: series.len(),
            });
        }

        let prices = series.prices();
        if let Some(bad) = prices.iter().find(|p| **p <= Decimal::ZERO) {
            return Err(IndicatorError::InvalidParameter(format!(
                "가격은 0보다 커야 합니다: {}",
                bad
            )));
        }

        let volatility = self.volatility.return_volatility(&prices)?;

        let sma = self.trend.sma(&prices)?;
        let latest = prices[prices.len() - 1];
        let momentum = self.trend.momentum(latest, sma)?;

        let raw = momentum
            .checked_mul(MOMENTUM_SCALE)
            .and_then(|m| m.checked_add(BASE_SCORE))
            .ok_or_else(|| IndicatorError::CalculationError("점수 오버플로".to_string()))?;
        let score = Self::clamp_score(raw);

        debug!(
            points = prices.len(),
            %sma,
            %momentum,
            %raw,
            score,
            volatility,
            "index computed"
        );

        Ok(IndexReading {
            score,
            volatility,
            sma,
            momentum,
        })
    }

    /// 원점수를 내림한 뒤 [0, 100]으로 제한합니다.
    fn clamp_score(raw: Decimal) -> u8 {
        let floored = raw.floor();
        if floored <= Decimal::ZERO {
            0
        } else if floored >= Decimal::from(MAX_SCORE) {
            MAX_SCORE
        } else {
            floored.to_u8().unwrap_or(MAX_SCORE)
        }
    }
}
