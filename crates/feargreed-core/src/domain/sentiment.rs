//! 시장 심리 분류 및 지수 결과 레코드.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 점수 상한 (포함).
pub const MAX_SCORE: u8 = 100;

/// 이 점수를 초과하면 "Extreme Greed".
pub const GREED_THRESHOLD: u8 = 75;

/// 이 점수 미만이면 "Fear".
pub const FEAR_THRESHOLD: u8 = 25;

/// 지수 점수에서 파생되는 시장 심리.
///
/// 상단에는 "Extreme Greed"가 있지만 하단에는 "Extreme Fear" 구간이 없습니다.
/// 표시 클라이언트가 이 세 가지 값만 알고 있으므로 비대칭을 유지합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// 점수 < 25
    Fear,
    /// 25 ≤ 점수 ≤ 75
    Neutral,
    /// 점수 > 75
    #[serde(rename = "Extreme Greed")]
    ExtremeGreed,
}

impl Sentiment {
    /// 점수로 심리를 분류합니다.
    ///
    /// 경계값 25와 75는 모두 `Neutral`입니다.
    pub fn from_score(score: u8) -> Self {
        if score > GREED_THRESHOLD {
            Self::ExtremeGreed
        } else if score < FEAR_THRESHOLD {
            Self::Fear
        } else {
            Self::Neutral
        }
    }

    /// 응답에 쓰이는 표시 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fear => "Fear",
            Self::Neutral => "Neutral",
            Self::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 요청마다 새로 생성되는 지수 결과 레코드.
///
/// 생성 후에는 변경되지 않으며 소유권은 호출자에게 넘어갑니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 코인 식별자 (예: "pepe")
    pub coin: String,
    /// 0~100 범위의 지수 점수
    #[serde(rename = "index_score")]
    pub score: u8,
    /// 점수에서 분류된 심리
    pub sentiment: Sentiment,
    /// 계산 시각 (RFC 3339)
    #[serde(rename = "timestamp")]
    pub computed_at: DateTime<Utc>,
    /// 모델 버전 태그
    pub note: String,
    /// 일간 수익률의 모표준편차.
    ///
    /// 진단용 값이며 점수 계산에는 반영되지 않습니다.
    pub volatility: f64,
}

impl ScoreResult {
    /// 점수로부터 결과 레코드를 생성합니다. 심리는 점수에서 분류됩니다.
    pub fn new(
        coin: impl Into<String>,
        score: u8,
        volatility: f64,
        computed_at: DateTime<Utc>,
        note: impl Into<String>,
    ) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            coin: coin.into(),
            score,
            sentiment: Sentiment::from_score(score),
            computed_at,
            note: note.into(),
            volatility,
        }
    }
}
