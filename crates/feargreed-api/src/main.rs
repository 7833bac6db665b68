//! 공포/탐욕 지수 API 서버.
//!
//! 기본 모드는 Axum 서버를 시작합니다.
//! `--once` 플래그 또는 `SCORE_ONCE` 환경변수가 설정되면 지수를 한 번 계산해
//! stdout으로 출력하고 종료합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use feargreed_api::error::ApiErrorResponse;
use feargreed_api::routes::create_router;
use feargreed_api::services::ScoreService;
use feargreed_api::state::AppState;
use feargreed_core::{init_logging, AppConfig, LogConfig, SystemClock};
use feargreed_data::CoinGeckoClient;

/// 단발 실행 모드 여부.
fn is_once_mode() -> bool {
    let once_flag = std::env::args().any(|arg| arg == "--once");
    let once_env = std::env::var("SCORE_ONCE")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    once_flag || once_env
}

/// 지수를 한 번 계산해 JSON으로 출력합니다.
async fn run_once(service: &ScoreService) -> anyhow::Result<()> {
    match service.handle().await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Score computation failed");
            let (_, body) = ApiErrorResponse::score_unavailable();
            println!("{}", serde_json::to_string_pretty(&body.0)?);
            anyhow::bail!("score unavailable")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드
    let config = AppConfig::load_default().context("설정 로드 실패")?;

    // tracing 초기화
    init_logging(LogConfig::from(&config.logging)).map_err(|e| anyhow::anyhow!(e))?;

    info!(
        coin = %config.market.coin_id,
        vs_currency = %config.market.vs_currency,
        lookback_days = config.market.lookback_days,
        ttl_minutes = config.cache.ttl_minutes,
        "Starting fear & greed index service..."
    );

    let source = Arc::new(CoinGeckoClient::from_config(&config.market)?);
    let service = ScoreService::from_config(&config, source, Arc::new(SystemClock));

    if is_once_mode() {
        return run_once(&service).await;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "소켓 주소 설정이 유효하지 않습니다. FEARGREED__SERVER__HOST, FEARGREED__SERVER__PORT 환경변수를 확인하세요."
            );
            e
        })?;

    let state = Arc::new(AppState::new(service));
    info!(version = %state.version, "Application state initialized");

    let app = create_router(state, &config.server.cors_origins);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
