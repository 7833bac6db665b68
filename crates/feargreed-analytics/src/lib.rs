//! 공포/탐욕 지수 계산.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 단순 평균(SMA) 및 수익률 변동성 지표
//! - 가격 시계열을 0~100 점수로 변환하는 [`IndexCalculator`]

pub mod indicators;

pub use indicators::{
    IndexCalculator, IndexReading, IndicatorError, IndicatorResult, TrendIndicators,
    VolatilityIndicators,
};
