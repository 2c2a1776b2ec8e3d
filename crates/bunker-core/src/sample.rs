//! 預設算例

use crate::{PlannerConfig, Request};

/// 預設算例的開始時間
pub const DEFAULT_START_TIMES: [i64; 11] = [10, 100, 170, 210, 270, 330, 370, 400, 440, 490, 560];

/// 預設算例的油量
pub const DEFAULT_VOLUMES: [i64; 11] = [40, 10, 20, 50, 50, 20, 10, 20, 40, 20, 90];

/// 預設算例的 11 筆請求
pub fn default_requests() -> Vec<Request> {
    DEFAULT_START_TIMES
        .iter()
        .zip(DEFAULT_VOLUMES.iter())
        .map(|(&start_time, &volume)| Request::new(start_time, volume))
        .collect()
}

/// 預設單船配置：容量 100，滿艙補給 30
pub fn default_config() -> PlannerConfig {
    PlannerConfig::new(1, 100, 30)
}
