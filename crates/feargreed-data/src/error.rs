//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 시장 데이터 가져오기 오류.
///
/// 재시도하지 않으며, 원인은 호출자에게 그대로 전달됩니다.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 요청 파라미터 오류 (HTTP 호출 전 검증 실패)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 요청 타임아웃
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// 전송 계층 오류 (연결 실패 등)
    #[error("HTTP transport error: {0}")]
    Http(#[source] reqwest::Error),

    /// 2xx가 아닌 응답
    #[error("Unexpected HTTP status: {status}")]
    Status { status: u16 },

    /// 응답 본문 파싱 실패 또는 잘못된 값
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// 가격 데이터가 비어 있음
    #[error("Empty price series for {0}")]
    EmptySeries(String),
}

impl FetchError {
    /// 로그에 남기는 고정 분류 문자열.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidRequest(_) => "invalid_request",
            FetchError::Timeout(_) => "timeout",
            FetchError::Http(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Malformed(_) => "malformed",
            FetchError::EmptySeries(_) => "empty_series",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Http(err)
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_is_malformed() {
        let err: FetchError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_status_display() {
        let err = FetchError::Status { status: 429 };
        assert_eq!(err.to_string(), "Unexpected HTTP status: 429");
        assert_eq!(err.kind(), "status");
    }
}
