//! 공포/탐욕 지수 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (지수, 가격 시계열, 헬스 체크)
//! - 캐시와 계산기를 묶는 [`ScoreService`]
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`services`]: 지수 서비스
//! - [`error`]: API 에러 응답

pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use routes::*;
pub use services::{MarketSnapshot, ScoreRequest, ScoreService, ServiceError};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, StubSource};
