//! TTL 기반 단일 슬롯 캐시.
//!
//! # 동작 흐름
//!
//! ```text
//! get_or_refresh(clock, refresh)
//!         │
//!         ▼
//! ┌───────────────────┐
//! │ 1. 슬롯 Lock 획득   │ ← 갱신 중이면 대기 후 현재 시각 확인
//! └─────────┬─────────┘
//!           │
//!     ┌─────┴──────┐
//!     │ TTL 이내?   │
//!     └─────┬──────┘
//!       YES │ NO
//!           │   │
//!           │   ▼
//!           │ ┌─────────────────────┐
//!           │ │ 2. 기존 항목 폐기     │
//!           │ │ 3. refresh() 호출    │ ← 실패 시 빈 상태 유지
//!           │ └──────────┬──────────┘
//!           ▼            ▼
//!     ┌─────────────────────┐
//!     │ 4. 항목 반환          │
//!     └─────────────────────┘
//! ```

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use feargreed_core::{Clock, PriceSeries};
use tokio::sync::Mutex;
use tracing::debug;

/// 캐시 항목.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// 가격 시계열
    pub series: Arc<PriceSeries>,
    /// 가져온 시각
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// `now` 기준 경과 시간.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// `now` 기준으로 TTL 이내인지 확인.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// 가장 최근 조회 결과 1건을 보관하는 캐시.
///
/// 슬롯 Lock을 갱신 동안 유지하므로 동시에 들어온 요청은 직렬화되고,
/// 외부 호출은 한 번에 하나만 진행됩니다.
#[derive(Debug)]
pub struct FreshnessCache {
    /// 캐시 유효 기간 (이 시간 이내면 신선하다고 간주)
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl FreshnessCache {
    /// 빈 캐시 생성.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// 캐시 유효 기간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 갱신 없이 현재 항목 조회.
    pub async fn peek(&self) -> Option<CacheEntry> {
        self.slot.lock().await.clone()
    }

    /// 항목 제거.
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }

    /// 신선한 항목을 반환하거나, 없으면 `refresh`로 새로 가져옵니다.
    ///
    /// 현재 시각은 슬롯 Lock을 얻은 뒤에 읽으므로, 앞선 갱신을 기다린 호출도
    /// 대기 후 시각으로 신선도를 판단합니다.
    ///
    /// 만료된 항목은 갱신 전에 폐기되므로 갱신이 실패하면 캐시는 빈 상태가 되고
    /// 오류는 그대로 반환됩니다.
    pub async fn get_or_refresh<F, Fut, E>(
        &self,
        clock: &dyn Clock,
        refresh: F,
    ) -> Result<CacheEntry, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PriceSeries, E>>,
    {
        let mut slot = self.slot.lock().await;
        let now = clock.now();

        if let Some(entry) = slot.as_ref() {
            if entry.is_fresh(now, self.ttl) {
                debug!(
                    age_secs = entry.age(now).num_seconds(),
                    points = entry.series.len(),
                    "Cache hit"
                );
                return Ok(entry.clone());
            }
            debug!(age_secs = entry.age(now).num_seconds(), "Cache expired");
        }

        slot.take();

        let series = refresh().await?;
        let entry = CacheEntry {
            series: Arc::new(series),
            fetched_at: now,
        };
        *slot = Some(entry.clone());

        Ok(entry)
    }
}
