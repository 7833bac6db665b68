//! 공포/탐욕 지수 서비스.
//!
//! 요청 1회의 흐름:
//! 1. [`FreshnessCache`]에서 신선한 시계열 조회 (없으면 데이터 소스에서 가져옴)
//! 2. [`IndexCalculator`]로 점수 계산
//! 3. 점수에서 심리 분류 후 [`ScoreResult`] 반환

use std::sync::Arc;

use chrono::{DateTime, Utc};
use feargreed_analytics::{IndexCalculator, IndicatorError};
use feargreed_core::{AppConfig, CacheConfig, Clock, MarketConfig, PriceSeries, ScoreResult};
use feargreed_data::{CacheEntry, FetchError, FreshnessCache, MarketDataSource};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// 서비스 오류.
///
/// HTTP 경계에서 하나의 일반 500 응답으로 변환되며, 원인은 로그에만 남습니다.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 시장 데이터 조회 실패
    #[error("시장 데이터 조회 실패: {0}")]
    Fetch(#[from] FetchError),

    /// 지수 계산 실패
    #[error("지수 계산 실패: {0}")]
    Index(#[from] IndicatorError),
}

impl ServiceError {
    /// 로그용 고정 분류 문자열.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Fetch(_) => "fetch",
            ServiceError::Index(IndicatorError::InsufficientData { .. }) => "insufficient_data",
            ServiceError::Index(_) => "invalid_data",
        }
    }
}

/// 조회 대상.
///
/// 캐시 슬롯이 하나이므로 프로세스당 대상도 하나로 고정됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRequest {
    /// 코인 식별자
    pub coin_id: String,
    /// 호가 통화
    pub vs_currency: String,
    /// 조회 기간 (일)
    pub lookback_days: u32,
}

impl From<&MarketConfig> for ScoreRequest {
    fn from(config: &MarketConfig) -> Self {
        Self {
            coin_id: config.coin_id.clone(),
            vs_currency: config.vs_currency.clone(),
            lookback_days: config.lookback_days,
        }
    }
}

/// 캐시된 시계열과 조회 정보.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    /// 코인 식별자
    pub coin: String,
    /// 호가 통화
    pub vs_currency: String,
    /// 데이터를 가져온 시각
    pub fetched_at: DateTime<Utc>,
    /// 가격 시계열
    pub series: Arc<PriceSeries>,
}

/// 공포/탐욕 지수 서비스.
pub struct ScoreService {
    source: Arc<dyn MarketDataSource>,
    cache: FreshnessCache,
    calculator: IndexCalculator,
    clock: Arc<dyn Clock>,
    request: ScoreRequest,
    note: String,
}

impl ScoreService {
    /// 새 서비스 생성. 캐시는 빈 상태로 시작합니다.
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        clock: Arc<dyn Clock>,
        request: ScoreRequest,
        cache: &CacheConfig,
        note: impl Into<String>,
    ) -> Self {
        Self {
            source,
            cache: FreshnessCache::new(cache.ttl()),
            calculator: IndexCalculator::new(),
            clock,
            request,
            note: note.into(),
        }
    }

    /// 설정에서 서비스 생성.
    pub fn from_config(
        config: &AppConfig,
        source: Arc<dyn MarketDataSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            source,
            clock,
            ScoreRequest::from(&config.market),
            &config.cache,
            config.score.note.clone(),
        )
    }

    /// 조회 대상.
    pub fn request(&self) -> &ScoreRequest {
        &self.request
    }

    /// 캐시 (테스트 및 진단용).
    pub fn cache(&self) -> &FreshnessCache {
        &self.cache
    }

    /// 신선한 시계열을 반환합니다. 만료되었으면 데이터 소스에서 새로 가져옵니다.
    async fn series(&self) -> Result<CacheEntry, FetchError> {
        let request = &self.request;
        let source = &self.source;

        self.cache
            .get_or_refresh(self.clock.as_ref(), || async move {
                source
                    .fetch(
                        &request.coin_id,
                        &request.vs_currency,
                        request.lookback_days,
                    )
                    .await
            })
            .await
    }

    /// 지수를 계산해 결과 레코드를 반환합니다.
    ///
    /// # 에러
    /// - 데이터 조회 실패 시 `ServiceError::Fetch` (계산은 수행하지 않음)
    /// - 계산 실패 시 `ServiceError::Index`
    #[instrument(skip(self), fields(coin = %self.request.coin_id))]
    pub async fn handle(&self) -> Result<ScoreResult, ServiceError> {
        let entry = self.series().await?;
        let reading = self.calculator.compute(&entry.series)?;

        let result = ScoreResult::new(
            self.request.coin_id.clone(),
            reading.score,
            reading.volatility,
            self.clock.now(),
            self.note.clone(),
        );

        info!(
            score = result.score,
            sentiment = %result.sentiment,
            volatility = result.volatility,
            "Index computed"
        );
        debug!(sma = %reading.sma, momentum = %reading.momentum, "Index components");

        Ok(result)
    }

    /// 차트 표시용 시계열을 반환합니다. 캐시를 공유하므로 추가 외부 호출이 없습니다.
    #[instrument(skip(self), fields(coin = %self.request.coin_id))]
    pub async fn market_series(&self) -> Result<MarketSnapshot, ServiceError> {
        let entry = self.series().await?;

        Ok(MarketSnapshot {
            coin: self.request.coin_id.clone(),
            vs_currency: self.request.vs_currency.clone(),
            fetched_at: entry.fetched_at,
            series: entry.series,
        })
    }
}

impl std::fmt::Debug for ScoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreService")
            .field("request", &self.request)
            .field("ttl", &self.cache.ttl())
            .field("note", &self.note)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StubSource;
    use chrono::{Duration, TimeZone};
    use feargreed_core::{ManualClock, Sentiment};
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
    }

    fn service(source: Arc<StubSource>, clock: Arc<ManualClock>) -> ScoreService {
        ScoreService::from_config(&AppConfig::default(), source, clock)
    }

    #[tokio::test]
    async fn test_handle_worked_example() {
        let source = Arc::new(StubSource::with_prices(&[
            dec!(100),
            dec!(105),
            dec!(110),
            dec!(108),
            dec!(112),
        ]));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source.clone(), clock);

        let result = service.handle().await.unwrap();

        assert_eq!(result.coin, "pepe");
        assert_eq!(result.score, 54);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.computed_at, t0());
        assert_eq!(result.note, "Raw Alpha v1.0");
        assert!(result.volatility > 0.0);
        assert_eq!(source.calls(), 1);
        assert_eq!(
            source.last_request(),
            Some(("pepe".to_string(), "usd".to_string(), 30))
        );
    }

    #[tokio::test]
    async fn test_handle_uses_cache_within_ttl() {
        let source = Arc::new(StubSource::with_prices(&[dec!(100), dec!(100)]));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source.clone(), clock.clone());

        service.handle().await.unwrap();
        assert_eq!(source.calls(), 1);

        clock.advance(Duration::minutes(2));
        let second = service.handle().await.unwrap();
        assert_eq!(source.calls(), 1);
        assert_eq!(second.computed_at, t0() + Duration::minutes(2));

        clock.advance(Duration::minutes(4));
        service.handle().await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_computation() {
        let source = Arc::new(StubSource::failing(|| FetchError::Status { status: 503 }));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source.clone(), clock);

        let err = service.handle().await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Fetch(FetchError::Status { status: 503 })
        ));
        assert_eq!(err.kind(), "fetch");
        assert!(service.cache().peek().await.is_none());
    }

    #[tokio::test]
    async fn test_insufficient_data() {
        let source = Arc::new(StubSource::with_prices(&[dec!(100)]));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source, clock);

        let err = service.handle().await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Index(IndicatorError::InsufficientData { provided: 1, .. })
        ));
        assert_eq!(err.kind(), "insufficient_data");
    }

    #[tokio::test]
    async fn test_extreme_greed() {
        // 최신가가 평균 대비 크게 상승
        let source = Arc::new(StubSource::with_prices(&[dec!(100), dec!(100), dec!(200)]));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source, clock);

        let result = service.handle().await.unwrap();

        assert_eq!(result.score, 100);
        assert_eq!(result.sentiment, Sentiment::ExtremeGreed);
    }

    #[tokio::test]
    async fn test_market_series_shares_cache() {
        let source = Arc::new(StubSource::with_prices(&[dec!(1), dec!(2), dec!(3)]));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source.clone(), clock);

        service.handle().await.unwrap();
        let snapshot = service.market_series().await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(snapshot.coin, "pepe");
        assert_eq!(snapshot.vs_currency, "usd");
        assert_eq!(snapshot.fetched_at, t0());
        assert_eq!(snapshot.series.len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_after_ttl_uses_current_clock() {
        let source = Arc::new(StubSource::with_prices(&[dec!(1), dec!(2)]));
        let clock = Arc::new(ManualClock::new(t0()));
        let service = service(source.clone(), clock.clone());

        service.market_series().await.unwrap();
        clock.set(t0() + Duration::minutes(5));
        let snapshot = service.market_series().await.unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(snapshot.fetched_at, t0() + Duration::minutes(5));
    }

    #[test]
    fn test_error_kind() {
        let err = ServiceError::from(IndicatorError::InvalidParameter("x".into()));
        assert_eq!(err.kind(), "invalid_data");
    }
}
