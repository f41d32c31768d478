//! ScanWindow - 1 回のスキャンで調べる半開区間 `[start, end)`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open date range `[start, end)`.
///
/// `start` は watermark、`end` はその回の today。保存はされず毎回計算される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScanWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `end <= start` のとき空（watermark が today に追いついている）。
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Inclusive start, exclusive end.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl fmt::Display for ScanWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
