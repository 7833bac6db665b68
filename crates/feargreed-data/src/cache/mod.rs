//! 캐싱 레이어.
//!
//! - Freshness 캐시: 가장 최근 가격 시계열 1건을 TTL 동안 보관

pub mod freshness;

pub use freshness::{CacheEntry, FreshnessCache};
