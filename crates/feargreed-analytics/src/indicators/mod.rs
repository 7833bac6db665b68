//! 기술적 지표 모듈.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 전체 구간 단순 평균 (Simple Moving Average)
//! - **모멘텀**: 최신가의 SMA 대비 정규화 편차
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **수익률**: 구간별 단순 수익률
//! - **수익률 변동성**: 수익률의 모표준편차
//!
//! ## 공포/탐욕 지수
//! - [`IndexCalculator`]: 모멘텀 기반 0~100 점수
//!
//! # 사용 예시
//!
//! ```ignore
//! use feargreed_analytics::indicators::IndexCalculator;
//!
//! let reading = IndexCalculator::new().compute(&series)?;
//! println!("score = {}, volatility = {:.4}", reading.score, reading.volatility);
//! ```

pub mod index;
pub mod trend;
pub mod volatility;

use thiserror::Error;

pub use index::{IndexCalculator, IndexReading};
pub use trend::TrendIndicators;
pub use volatility::VolatilityIndicators;

/// 지표 계산 오류.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
