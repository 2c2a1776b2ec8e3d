//! 加油船模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 加油船（bunker）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bunker {
    /// 油艙容量
    pub capacity: i64,

    /// 空艙加滿所需時間
    pub full_refill_duration: i64,

    /// 初始油量（預設滿艙）
    pub initial_fuel: i64,
}

impl Bunker {
    /// 創建新的加油船（滿艙出發）
    pub fn new(capacity: i64, full_refill_duration: i64) -> Self {
        Self {
            capacity,
            full_refill_duration,
            initial_fuel: capacity,
        }
    }

    /// 建構器模式：設置初始油量
    pub fn with_initial_fuel(mut self, initial_fuel: i64) -> Self {
        self.initial_fuel = initial_fuel;
        self
    }

    /// 補給指定油量所需時間 = 油量 / 容量 × 滿艙補給時間
    pub fn refill_duration(&self, volume: Decimal) -> Decimal {
        if self.capacity <= 0 {
            return Decimal::ZERO;
        }
        volume * Decimal::from(self.full_refill_duration) / Decimal::from(self.capacity)
    }

    /// 在給定空檔內最多可補給的油量（不超過容量）
    pub fn max_refill_within(&self, window: i64) -> i64 {
        if window <= 0 || self.full_refill_duration <= 0 {
            return 0;
        }
        (window * self.capacity / self.full_refill_duration).min(self.capacity)
    }

    /// 初始空餘艙容
    pub fn initial_headroom(&self) -> i64 {
        self.capacity - self.initial_fuel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_bunker() {
        let bunker = Bunker::new(100, 30);
        assert_eq!(bunker.capacity, 100);
        assert_eq!(bunker.initial_fuel, 100);
        assert_eq!(bunker.initial_headroom(), 0);
    }

    #[test]
    fn test_initial_fuel_builder() {
        let bunker = Bunker::new(100, 30).with_initial_fuel(40);
        assert_eq!(bunker.initial_fuel, 40);
        assert_eq!(bunker.initial_headroom(), 60);
    }

    #[rstest]
    #[case(100, Decimal::from(30))]
    #[case(50, Decimal::from(15))]
    #[case(0, Decimal::ZERO)]
    fn test_refill_duration(#[case] volume: i64, #[case] expected: Decimal) {
        let bunker = Bunker::new(100, 30);
        assert_eq!(bunker.refill_duration(Decimal::from(volume)), expected);
    }

    #[rstest]
    #[case(10, 33)]
    #[case(20, 66)]
    #[case(50, 100)]
    #[case(0, 0)]
    #[case(-5, 0)]
    fn test_max_refill_within(#[case] window: i64, #[case] expected: i64) {
        let bunker = Bunker::new(100, 30);
        assert_eq!(bunker.max_refill_within(window), expected);
    }
}
