//! API 에러 응답 타입.
//!
//! 내부 오류의 원인은 로그에만 남기고, 클라이언트에는 고정된 코드와 메시지만 전달합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// 지수를 제공할 수 없을 때의 에러 코드.
pub const SCORE_UNAVAILABLE: &str = "SCORE_UNAVAILABLE";

/// 지수를 제공할 수 없을 때의 고정 메시지.
pub const SCORE_UNAVAILABLE_MESSAGE: &str = "Failed to fetch data";

/// API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "SCORE_UNAVAILABLE",
///   "message": "Failed to fetch data"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    /// 에러 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// 원인을 숨긴 500 응답.
    pub fn score_unavailable() -> (StatusCode, Json<Self>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self::new(SCORE_UNAVAILABLE, SCORE_UNAVAILABLE_MESSAGE)),
        )
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_unavailable_body() {
        let (status, Json(body)) = ApiErrorResponse::score_unavailable();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"code": "SCORE_UNAVAILABLE", "message": "Failed to fetch data"})
        );
        assert_eq!(body.to_string(), "[SCORE_UNAVAILABLE] Failed to fetch data");
    }
}
