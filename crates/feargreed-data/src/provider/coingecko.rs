//! CoinGecko `market_chart` 클라이언트.
//!
//! ## 요청
//! `GET {base_url}/coins/{id}/market_chart?vs_currency=usd&days=30&interval=daily`
//!
//! ## 응답
//! ```json
//! { "prices": [[1711929600000, 0.00000712], ...], "market_caps": [...], "total_volumes": [...] }
//! ```
//!
//! `prices` 이외의 필드는 무시합니다. `prices`가 없거나 값이 잘못되면
//! 기본값으로 대체하지 않고 `FetchError::Malformed`를 반환합니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use feargreed_core::{price_from_f64, DecimalExt, MarketConfig, PricePoint, PriceSeries};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::MarketDataSource;
use crate::error::{FetchError, Result};

/// `market_chart` 응답 본문.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]` 쌍 목록 (시간순)
    prices: Vec<(f64, f64)>,
}

/// CoinGecko API 클라이언트.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    interval: Option<String>,
}

impl CoinGeckoClient {
    /// 새 클라이언트를 생성합니다.
    ///
    /// # 인자
    /// * `base_url` - API 기본 URL (테스트에서는 mock 서버 주소)
    /// * `timeout` - 요청 전체 타임아웃
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feargreed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval: None,
        })
    }

    /// 설정에서 클라이언트를 생성합니다.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        Ok(Self::new(&config.base_url, config.request_timeout())?.with_interval(&config.interval))
    }

    /// 데이터 간격을 설정합니다 (예: "daily"). 빈 문자열이면 생략합니다.
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        let interval = interval.into();
        self.interval = if interval.trim().is_empty() {
            None
        } else {
            Some(interval)
        };
        self
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn validate(asset_id: &str, currency: &str, lookback_days: u32) -> Result<()> {
        if asset_id.is_empty()
            || !asset_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(FetchError::InvalidRequest(format!(
                "invalid asset id: {:?}",
                asset_id
            )));
        }
        if currency.trim().is_empty() {
            return Err(FetchError::InvalidRequest("currency is empty".to_string()));
        }
        if lookback_days == 0 {
            return Err(FetchError::InvalidRequest(
                "lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 응답 본문을 가격 시계열로 변환합니다.
    fn parse_body(asset_id: &str, body: &str) -> Result<PriceSeries> {
        let response: MarketChartResponse = serde_json::from_str(body)?;

        if response.prices.is_empty() {
            return Err(FetchError::EmptySeries(asset_id.to_string()));
        }

        let points = response
            .prices
            .into_iter()
            .enumerate()
            .map(|(i, (ts, price))| {
                if !ts.is_finite() {
                    return Err(FetchError::Malformed(format!(
                        "non-finite timestamp at index {}",
                        i
                    )));
                }
                let timestamp = DateTime::from_timestamp_millis(ts.round() as i64).ok_or_else(
                    || FetchError::Malformed(format!("timestamp out of range at index {}", i)),
                )?;
                let price = price_from_f64(price)
                    .filter(|p| p.is_strictly_positive())
                    .ok_or_else(|| {
                        FetchError::Malformed(format!("invalid price {} at index {}", price, i))
                    })?;
                Ok(PricePoint::new(timestamp, price))
            })
            .collect::<Result<Vec<_>>>()?;

        PriceSeries::new(points).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    #[instrument(skip(self), fields(base_url = %self.base_url), level = "debug")]
    async fn fetch(
        &self,
        asset_id: &str,
        currency: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries> {
        Self::validate(asset_id, currency, lookback_days)?;

        let url = format!("{}/coins/{}/market_chart", self.base_url, asset_id);
        let days = lookback_days.to_string();
        let mut query: Vec<(&str, &str)> = vec![("vs_currency", currency), ("days", days.as_str())];
        if let Some(interval) = &self.interval {
            query.push(("interval", interval.as_str()));
        }

        info!(asset_id, currency, lookback_days, "Fetching fresh market chart");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let series = Self::parse_body(asset_id, &body)?;

        debug!(
            asset_id,
            points = series.len(),
            first = ?series.first().map(|p| p.timestamp),
            last = ?series.last().map(|p| p.timestamp),
            "market chart received"
        );

        Ok(series)
    }
}
