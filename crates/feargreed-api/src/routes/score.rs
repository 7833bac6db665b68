//! 지수 endpoint.
//!
//! GET / , GET /api/v1/score
//!
//! 성공 시 결과 레코드를, 실패 시 원인을 숨긴 500 응답을 반환합니다.

use axum::{extract::State, routing::get, Json, Router};
use feargreed_core::ScoreResult;
use std::sync::Arc;
use tracing::error;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 현재 지수 조회.
pub async fn get_score(State(state): State<Arc<AppState>>) -> ApiResult<Json<ScoreResult>> {
    state.score_service.handle().await.map(Json).map_err(|e| {
        error!(kind = e.kind(), error = %e, "Score request failed");
        ApiErrorResponse::score_unavailable()
    })
}

/// 지수 라우터.
pub fn score_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_score))
}
