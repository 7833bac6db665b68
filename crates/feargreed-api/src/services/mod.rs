//! 서비스 모듈.
//!
//! 데이터 조회, 캐시, 지수 계산을 하나의 요청 흐름으로 묶는 서비스들을 제공합니다.

pub mod score;

pub use score::{MarketSnapshot, ScoreRequest, ScoreService, ServiceError};
