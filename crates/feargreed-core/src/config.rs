//! 설정 관리.
//!
//! 설정은 다음 순서로 병합됩니다 (뒤쪽이 우선):
//! 1. 내장 기본값
//! 2. TOML 설정 파일 (없으면 건너뜀)
//! 3. `FEARGREED__` 접두사 환경 변수 (예: `FEARGREED__MARKET__COIN_ID=bonk`)
//! 4. `COIN_ID` 환경 변수 (`market.coin_id`만 덮어씀)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// 환경 변수 접두사.
const ENV_PREFIX: &str = "FEARGREED";

/// 코인 식별자만 덮어쓰는 단축 환경 변수.
const COIN_ID_ENV: &str = "COIN_ID";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 시장 데이터 소스 설정
    pub market: MarketConfig,
    /// 캐시 설정
    pub cache: CacheConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 결과 레코드 설정
    pub score: ScoreConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 허용할 CORS origin 목록. 비어 있으면 모든 origin 허용.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

/// 시장 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    /// 코인 식별자 (CoinGecko id)
    pub coin_id: String,
    /// 호가 통화
    pub vs_currency: String,
    /// 조회 기간 (일)
    pub lookback_days: u32,
    /// 데이터 간격
    pub interval: String,
    /// API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            coin_id: "pepe".to_string(),
            vs_currency: "usd".to_string(),
            lookback_days: 30,
            interval: "daily".to_string(),
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl MarketConfig {
    /// 요청 타임아웃.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 캐시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// 캐시 TTL (분)
    pub ttl_minutes: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_minutes: 5 }
    }
}

impl CacheConfig {
    /// 캐시 TTL.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.ttl_minutes))
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 기록 (요청 소요 시간 확인용)
    pub span_events: bool,
    /// 소스 파일명과 줄 번호 출력
    pub with_file: bool,
    /// 모듈 경로 출력
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
            with_file: false,
            with_target: true,
        }
    }
}

/// 결과 레코드 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// 결과에 붙는 모델 버전 태그
    pub note: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            note: "Raw Alpha v1.0".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아닙니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        Self::build(path.as_ref(), None)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        Self::load("config/default.toml")
    }

    /// 프로세스 환경 대신 주어진 변수 맵을 사용해 로드합니다.
    pub fn load_with_env<P: AsRef<Path>>(
        path: P,
        vars: HashMap<String, String>,
    ) -> CoreResult<Self> {
        Self::build(path.as_ref(), Some(vars))
    }

    fn build(path: &Path, vars: Option<HashMap<String, String>>) -> CoreResult<Self> {
        let coin_override = match &vars {
            Some(vars) => vars.get(COIN_ID_ENV).cloned(),
            None => std::env::var(COIN_ID_ENV).ok(),
        }
        .filter(|v| !v.trim().is_empty());

        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .source(vars),
            )
            .set_override_option("market.coin_id", coin_override)?;

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.market.coin_id.trim().is_empty() {
            return Err(CoreError::Config("market.coin_id must not be empty".into()));
        }
        if self.market.vs_currency.trim().is_empty() {
            return Err(CoreError::Config(
                "market.vs_currency must not be empty".into(),
            ));
        }
        if self.market.lookback_days == 0 {
            return Err(CoreError::Config(
                "market.lookback_days must be at least 1".into(),
            ));
        }
        if self.market.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "market.request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn missing_file() -> std::path::PathBuf {
        std::env::temp_dir().join("feargreed-config-does-not-exist.toml")
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load_with_env(missing_file(), HashMap::new()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.market.coin_id, "pepe");
        assert_eq!(config.market.vs_currency, "usd");
        assert_eq!(config.market.lookback_days, 30);
        assert_eq!(config.market.interval, "daily");
        assert_eq!(config.cache.ttl(), chrono::Duration::minutes(5));
        assert_eq!(config.score.note, "Raw Alpha v1.0");
        assert!(config.server.cors_origins.is_empty());
        assert!(!config.logging.span_events);
        assert!(!config.logging.with_file);
        assert!(config.logging.with_target);
    }

    #[test]
    fn test_file_then_env_override() {
        let path = std::env::temp_dir().join(format!(
            "feargreed-config-test-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[market]\ncoin_id = \"bonk\"\nlookback_days = 14\n\n[cache]\nttl_minutes = 2"
        )
        .unwrap();

        let config = AppConfig::load_with_env(
            &path,
            vars(&[("FEARGREED__MARKET__LOOKBACK_DAYS", "7")]),
        )
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.market.coin_id, "bonk");
        assert_eq!(config.market.lookback_days, 7);
        assert_eq!(config.cache.ttl_minutes, 2);
        // 파일에 없는 값은 기본값 유지
        assert_eq!(config.market.vs_currency, "usd");
    }

    #[test]
    fn test_coin_id_shortcut_wins() {
        let config = AppConfig::load_with_env(
            missing_file(),
            vars(&[
                ("FEARGREED__MARKET__COIN_ID", "bonk"),
                ("COIN_ID", "dogecoin"),
            ]),
        )
        .unwrap();

        assert_eq!(config.market.coin_id, "dogecoin");
    }

    #[test]
    fn test_cors_origins_list() {
        let config = AppConfig::load_with_env(
            missing_file(),
            vars(&[(
                "FEARGREED__SERVER__CORS_ORIGINS",
                "http://localhost:8501,https://example.com",
            )]),
        )
        .unwrap();

        assert_eq!(
            config.server.cors_origins,
            vec!["http://localhost:8501", "https://example.com"]
        );
    }

    #[test]
    fn test_logging_switches_from_env() {
        let config = AppConfig::load_with_env(
            missing_file(),
            vars(&[
                ("FEARGREED__LOGGING__SPAN_EVENTS", "true"),
                ("FEARGREED__LOGGING__WITH_FILE", "true"),
                ("FEARGREED__LOGGING__WITH_TARGET", "false"),
            ]),
        )
        .unwrap();

        assert!(config.logging.span_events);
        assert!(config.logging.with_file);
        assert!(!config.logging.with_target);
    }

    #[test]
    fn test_validate_rejects_zero_lookback() {
        let result = AppConfig::load_with_env(
            missing_file(),
            vars(&[("FEARGREED__MARKET__LOOKBACK_DAYS", "0")]),
        );

        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_coin() {
        let mut config = AppConfig::default();
        config.market.coin_id = "  ".to_string();
        assert!(config.validate().is_err());

        config.market.coin_id = "pepe".to_string();
        config.market.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
