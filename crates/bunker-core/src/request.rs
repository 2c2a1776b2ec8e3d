//! 加油請求模型

use serde::{Deserialize, Serialize};

/// 加油請求
///
/// 燃料在服務窗口內線性消耗，`end_time()` 之後服務船的油艙才可再次操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// 開始時間
    pub start_time: i64,

    /// 需求油量
    pub volume: i64,
}

impl Request {
    /// 創建新的請求
    pub fn new(start_time: i64, volume: i64) -> Self {
        Self { start_time, volume }
    }

    /// 結束時間 = 開始時間 + 油量
    pub fn end_time(&self) -> i64 {
        self.start_time + self.volume
    }

    /// 本請求結束到下一請求開始之間的空檔（可能為負，表示重疊）
    pub fn gap_until(&self, next: &Request) -> i64 {
        next.start_time - self.end_time()
    }

    /// 檢查後續請求是否在本請求結束前開始
    pub fn overlaps(&self, later: &Request) -> bool {
        later.start_time < self.end_time()
    }
}

impl From<(i64, i64)> for Request {
    fn from((start_time, volume): (i64, i64)) -> Self {
        Self::new(start_time, volume)
    }
}
