//! 시장 데이터 수집 및 캐싱.
//!
//! 이 crate는 다음을 제공합니다:
//! - [`MarketDataSource`]: 가격 시계열 데이터 소스 트레잇
//! - [`CoinGeckoClient`]: CoinGecko `market_chart` API 클라이언트
//! - [`FreshnessCache`]: TTL 기반 단일 슬롯 캐시 (single-flight 갱신)

pub mod cache;
pub mod error;
pub mod provider;

pub use cache::{CacheEntry, FreshnessCache};
pub use error::{FetchError, Result};
pub use provider::{CoinGeckoClient, MarketDataSource};
