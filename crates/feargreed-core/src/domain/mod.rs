//! 도메인 모델.

pub mod market_data;
pub mod sentiment;

pub use market_data::{PricePoint, PriceSeries};
pub use sentiment::{ScoreResult, Sentiment, FEAR_THRESHOLD, GREED_THRESHOLD, MAX_SCORE};
