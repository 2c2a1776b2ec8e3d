//! 排程結果模型

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 排程項目（每筆請求一項）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 請求索引
    pub request_index: usize,

    /// 服務該請求的船（未服務為 None）
    pub bunker_index: Option<usize>,

    /// 服務前是否先補給
    pub refill_before: bool,

    /// 補給油量
    pub refill_volume: Decimal,

    /// 補給耗時
    pub refill_duration: Decimal,

    /// 服務前油量
    pub tank_before: Option<Decimal>,

    /// 服務後油量
    pub tank_after: Option<Decimal>,
}

impl ScheduleEntry {
    /// 創建未服務的項目
    pub fn unserved(request_index: usize) -> Self {
        Self {
            request_index,
            bunker_index: None,
            refill_before: false,
            refill_volume: Decimal::ZERO,
            refill_duration: Decimal::ZERO,
            tank_before: None,
            tank_after: None,
        }
    }

    /// 創建已服務的項目
    pub fn served(request_index: usize, bunker_index: usize) -> Self {
        Self {
            bunker_index: Some(bunker_index),
            ..Self::unserved(request_index)
        }
    }

    /// 建構器模式：設置前置補給
    pub fn with_refill(mut self, volume: Decimal, duration: Decimal) -> Self {
        self.refill_before = true;
        self.refill_volume = volume;
        self.refill_duration = duration;
        self
    }

    /// 建構器模式：設置服務前後油量
    pub fn with_tank_levels(mut self, before: Decimal, after: Decimal) -> Self {
        self.tank_before = Some(before);
        self.tank_after = Some(after);
        self
    }

    /// 是否已服務
    pub fn is_served(&self) -> bool {
        self.bunker_index.is_some()
    }
}

/// 排程（解讀後的求解結果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// 按請求索引排序的項目
    pub entries: Vec<ScheduleEntry>,

    /// 主目標值：服務的請求數，不受次要目標權重影響
    pub objective_value: f64,

    /// 模型目標值（含次要目標權重）
    pub weighted_objective: f64,
}

impl Schedule {
    /// 創建新的排程，主目標值由項目計算
    pub fn new(entries: Vec<ScheduleEntry>, weighted_objective: f64) -> Self {
        let served = entries.iter().filter(|e| e.is_served()).count();
        Self {
            entries,
            objective_value: served as f64,
            weighted_objective,
        }
    }

    /// 已服務請求數
    pub fn served_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_served()).count()
    }

    /// 未服務的請求索引
    pub fn unserved_requests(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| !e.is_served())
            .map(|e| e.request_index)
            .collect()
    }

    /// 指定船的項目（按時間順序）
    pub fn entries_for_bunker(&self, bunker_index: usize) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries
            .iter()
            .filter(move |e| e.bunker_index == Some(bunker_index))
    }

    /// 補給次數
    pub fn refill_count(&self) -> usize {
        self.entries.iter().filter(|e| e.refill_before).count()
    }

    /// 補給總油量
    pub fn total_refill_volume(&self) -> Decimal {
        self.entries.iter().map(|e| e.refill_volume).sum()
    }

    /// 取得指定請求的項目
    pub fn entry(&self, request_index: usize) -> Option<&ScheduleEntry> {
        self.entries.get(request_index)
    }

    /// 匯出為 JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "服務 {}/{} 筆請求，補給 {} 次（共 {}）",
            self.served_count(),
            self.entries.len(),
            self.refill_count(),
            self.total_refill_volume()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        Schedule::new(
            vec![
                ScheduleEntry::served(0, 0).with_tank_levels(Decimal::from(100), Decimal::from(60)),
                ScheduleEntry::unserved(1),
                ScheduleEntry::served(2, 1)
                    .with_refill(Decimal::from(20), Decimal::from(6))
                    .with_tank_levels(Decimal::from(100), Decimal::from(80)),
                ScheduleEntry::served(3, 0),
            ],
            14.0,
        )
    }

    #[test]
    fn test_schedule_counts() {
        let schedule = sample_schedule();

        assert_eq!(schedule.served_count(), 3);
        assert_eq!(schedule.objective_value, 3.0);
        assert_eq!(schedule.weighted_objective, 14.0);
        assert_eq!(schedule.unserved_requests(), vec![1]);
        assert_eq!(schedule.refill_count(), 1);
        assert_eq!(schedule.total_refill_volume(), Decimal::from(20));
    }

    #[test]
    fn test_entries_for_bunker() {
        let schedule = sample_schedule();

        let first: Vec<usize> = schedule
            .entries_for_bunker(0)
            .map(|e| e.request_index)
            .collect();
        assert_eq!(first, vec![0, 3]);
        assert_eq!(schedule.entries_for_bunker(1).count(), 1);
        assert_eq!(schedule.entries_for_bunker(2).count(), 0);
    }

    #[test]
    fn test_schedule_display_and_json() {
        let schedule = sample_schedule();
        assert_eq!(schedule.to_string(), "服務 3/4 筆請求，補給 1 次（共 20）");

        let json = schedule.to_json().unwrap();
        let parsed: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schedule);
    }
}
