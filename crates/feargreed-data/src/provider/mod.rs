//! 데이터 Provider 모듈.
//!
//! 외부 소스에서 가격 시계열을 가져오는 Provider들을 정의합니다.
//!
//! ## CoinGecko
//! - `CoinGeckoClient`: `/coins/{id}/market_chart` 엔드포인트 클라이언트

pub mod coingecko;

use async_trait::async_trait;
use feargreed_core::PriceSeries;

use crate::error::Result;

pub use coingecko::CoinGeckoClient;

/// 가격 시계열 데이터 소스 트레잇.
///
/// 호출 1회당 외부 요청을 정확히 1회 수행하며 재시도하지 않습니다.
/// 호출 횟수는 호출자(캐시)가 제어합니다.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// 최근 `lookback_days`일의 가격 시계열 조회.
    ///
    /// # 인자
    /// * `asset_id` - 코인 식별자 (예: "pepe")
    /// * `currency` - 호가 통화 (예: "usd")
    /// * `lookback_days` - 조회 기간 (1 이상)
    async fn fetch(&self, asset_id: &str, currency: &str, lookback_days: u32)
        -> Result<PriceSeries>;
}
