//! REST API 라우트.
//!
//! 엔드포인트:
//! - `GET /`, `GET /api/v1/score` - 현재 지수
//! - `GET /api/v1/market` - 지수 계산에 사용된 가격 시계열
//! - `GET /health` - liveness

pub mod health;
pub mod market;
pub mod score;

pub use health::{health_check, health_router};
pub use market::{get_market_series, market_router, MarketSeriesResponse};
pub use score::{get_score, score_router};

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::state::AppState;

/// 전역 요청 타임아웃.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 표시 클라이언트가 호출하는 루트 경로
        .route("/", get(get_score))
        .nest("/health", health_router())
        .nest("/api/v1/score", score_router())
        .nest("/api/v1/market", market_router())
}

/// CORS 레이어 생성.
///
/// `origins`가 비어 있으면 모든 origin을 허용합니다.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if parsed.is_empty() {
        if !origins.is_empty() {
            warn!("server.cors_origins contains no valid origins, allowing any");
        }
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", parsed.len());
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// 미들웨어를 포함한 전체 라우터 생성.
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer(cors_origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_test_state, StubSource};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use feargreed_core::ManualClock;
    use feargreed_data::FetchError;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(source: Arc<StubSource>) -> Router {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        ));
        create_router(Arc::new(create_test_state(source, clock)), &[])
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "https://dashboard.example.com")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn worked_example() -> Arc<StubSource> {
        Arc::new(StubSource::with_prices(&[
            dec!(100),
            dec!(105),
            dec!(110),
            dec!(108),
            dec!(112),
        ]))
    }

    #[tokio::test]
    async fn test_score_ok_with_cors() {
        for uri in ["/", "/api/v1/score"] {
            let response = app(worked_example()).oneshot(get_request(uri)).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
            assert_eq!(
                response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
                "*"
            );

            let json = body_json(response).await;
            assert_eq!(json["coin"], "pepe");
            assert_eq!(json["index_score"], 54);
            assert_eq!(json["sentiment"], "Neutral");
            assert_eq!(json["timestamp"], "2024-04-01T12:00:00Z");
            assert_eq!(json["note"], "Raw Alpha v1.0");
            assert!(json["volatility"].as_f64().unwrap() > 0.0);
        }
    }

    #[tokio::test]
    async fn test_score_failure_is_opaque() {
        let source = Arc::new(StubSource::failing(|| {
            FetchError::Malformed("secret upstream detail".to_string())
        }));
        let response = app(source).oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": "SCORE_UNAVAILABLE", "message": "Failed to fetch data"})
        );
    }

    #[tokio::test]
    async fn test_insufficient_data_is_opaque() {
        let source = Arc::new(StubSource::with_prices(&[dec!(1)]));
        let response = app(source).oneshot(get_request("/api/v1/score")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["code"], "SCORE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_market_series() {
        let source = worked_example();
        let router = app(source.clone());

        let response = router.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(get_request("/api/v1/market")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["coin"], "pepe");
        assert_eq!(json["vs_currency"], "usd");
        assert_eq!(json["prices"].as_array().unwrap().len(), 5);
        assert_eq!(json["prices"][4]["price"], "112");
        // 두 요청이 캐시를 공유
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_health() {
        let source = Arc::new(StubSource::failing(|| FetchError::Status { status: 500 }));
        let response = app(source.clone()).oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/score")
            .header(header::ORIGIN, "https://dashboard.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        let response = app(worked_example()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[test]
    fn test_cors_layer_with_origins() {
        // 잘못된 origin은 무시하고 생성 가능해야 함
        let _ = cors_layer(&["https://a.example.com".to_string(), "\n".to_string()]);
        let _ = cors_layer(&[]);
    }
}
