//! 시장 데이터 endpoint.
//!
//! GET /api/v1/market
//!
//! 지수 계산에 사용된 가격 시계열을 그대로 반환합니다 (차트 표시용).

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use feargreed_core::PricePoint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::services::MarketSnapshot;
use crate::state::AppState;

/// 가격 시계열 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarketSeriesResponse {
    /// 코인 식별자
    pub coin: String,
    /// 호가 통화
    pub vs_currency: String,
    /// 데이터를 가져온 시각
    pub fetched_at: DateTime<Utc>,
    /// 시간순 가격 목록
    pub prices: Vec<PricePoint>,
}

impl From<MarketSnapshot> for MarketSeriesResponse {
    fn from(snapshot: MarketSnapshot) -> Self {
        Self {
            coin: snapshot.coin,
            vs_currency: snapshot.vs_currency,
            fetched_at: snapshot.fetched_at,
            prices: snapshot.series.points().to_vec(),
        }
    }
}

/// 가격 시계열 조회.
pub async fn get_market_series(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MarketSeriesResponse>> {
    match state.score_service.market_series().await {
        Ok(snapshot) => Ok(Json(snapshot.into())),
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Market series request failed");
            Err(ApiErrorResponse::score_unavailable())
        }
    }
}

/// 시장 데이터 라우터.
pub fn market_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_market_series))
}
