//! 시장 데이터 타입.
//!
//! - `PricePoint` - 단일 시점의 가격
//! - `PriceSeries` - 시간순으로 정렬된 가격 시계열

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Price;

/// 단일 시점의 가격.
///
/// 데이터 소스만 생성하며 생성 후에는 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 가격 시점 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 가격 (호가 통화 단위)
    pub price: Price,
}

impl PricePoint {
    /// 새 가격 포인트를 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// 시간순으로 정렬된 가격 시계열.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 가격 포인트 목록으로 시계열을 생성합니다.
    ///
    /// 타임스탬프가 감소하는 구간이 있으면 `CoreError::InvalidSeries`를 반환합니다.
    /// 같은 타임스탬프가 연속되는 것은 허용합니다.
    pub fn new(points: Vec<PricePoint>) -> CoreResult<Self> {
        if let Some(idx) = points
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
        {
            return Err(CoreError::InvalidSeries(format!(
                "timestamps out of order at index {}: {} < {}",
                idx + 1,
                points[idx + 1].timestamp,
                points[idx].timestamp
            )));
        }

        Ok(Self { points })
    }

    /// 포인트 개수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 전체 포인트 슬라이스.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 시간순 가격 목록.
    pub fn prices(&self) -> Vec<Price> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// 가장 최근 포인트.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// 가장 오래된 포인트.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }
}
