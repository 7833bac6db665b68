//! # Fear & Greed Core
//!
//! 공포/탐욕 지수 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다른 크레이트 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열 (`PricePoint`, `PriceSeries`)
//! - 심리 분류 및 결과 레코드 (`Sentiment`, `ScoreResult`)
//! - 설정 관리
//! - 로깅 인프라
//! - 시계 추상화 (테스트에서 시간 고정용)

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
