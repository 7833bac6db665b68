//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use crate::services::ScoreService;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 지수 서비스 - 캐시를 소유하며 프로세스 수명 동안 유지
    pub score_service: Arc<ScoreService>,

    /// 서버 버전
    pub version: String,
}

impl AppState {
    /// 새 상태 생성.
    pub fn new(score_service: ScoreService) -> Self {
        Self {
            score_service: Arc::new(score_service),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{create_test_state, StubSource};

#[cfg(any(test, feature = "test-utils"))]
mod test_utils {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use feargreed_core::{AppConfig, Clock, PricePoint, PriceSeries};
    use feargreed_data::{FetchError, MarketDataSource};
    use rust_decimal::Decimal;

    use super::AppState;
    use crate::services::ScoreService;

    enum Outcome {
        Series(PriceSeries),
        Fail(fn() -> FetchError),
    }

    /// 고정된 응답을 돌려주는 테스트용 데이터 소스.
    pub struct StubSource {
        outcome: Outcome,
        calls: AtomicUsize,
        last_request: Mutex<Option<(String, String, u32)>>,
    }

    impl StubSource {
        /// 2024-01-01부터 하루 간격의 가격 시계열을 반환.
        pub fn with_prices(prices: &[Decimal]) -> Self {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let series = PriceSeries::new(
                prices
                    .iter()
                    .enumerate()
                    .map(|(i, p)| PricePoint::new(start + Duration::days(i as i64), *p))
                    .collect(),
            )
            .expect("chronological series");
            Self::new(Outcome::Series(series))
        }

        /// 항상 실패.
        pub fn failing(error: fn() -> FetchError) -> Self {
            Self::new(Outcome::Fail(error))
        }

        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        /// 호출 횟수.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// 마지막 호출 인자.
        pub fn last_request(&self) -> Option<(String, String, u32)> {
            self.last_request.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MarketDataSource for StubSource {
        async fn fetch(
            &self,
            asset_id: &str,
            currency: &str,
            lookback_days: u32,
        ) -> feargreed_data::Result<PriceSeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() =
                Some((asset_id.to_string(), currency.to_string(), lookback_days));

            match &self.outcome {
                Outcome::Series(series) => Ok(series.clone()),
                Outcome::Fail(error) => Err(error()),
            }
        }
    }

    /// 테스트용 AppState 생성 (기본 설정).
    pub fn create_test_state(source: Arc<StubSource>, clock: Arc<dyn Clock>) -> AppState {
        AppState::new(ScoreService::from_config(
            &AppConfig::default(),
            source,
            clock,
        ))
    }
}
