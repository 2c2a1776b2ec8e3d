//! # Bunker Optimizer
//!
//! 求解器協作層與排程流程（建模 → 求解 → 解讀）

pub mod lp;
pub mod planner;
pub mod solver;

// Re-export 主要類型
pub use lp::GoodLpSolver;
pub use planner::{Planner, Scenario};
pub use solver::{MilpSolver, SolveOutcome, SolverOptions};

use bunker_core::Schedule;
use bunker_model::SolveStatus;
use serde::{Deserialize, Serialize};

/// 排程結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// 是否得到排程
    pub feasible: bool,

    /// 求解狀態
    pub status: SolveStatus,

    /// 排程（不可行時為 None）
    pub schedule: Option<Schedule>,

    /// 模型規模
    pub stats: ModelStats,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,

    /// 訊息
    pub messages: Vec<String>,
}

impl PlanOutcome {
    /// 創建可行的結果
    pub fn feasible(schedule: Schedule, stats: ModelStats) -> Self {
        Self {
            feasible: true,
            status: SolveStatus::Optimal,
            schedule: Some(schedule),
            stats,
            calculation_time_ms: None,
            messages: Vec::new(),
        }
    }

    /// 創建無排程的結果
    pub fn unsolved(status: SolveStatus, stats: ModelStats, message: String) -> Self {
        Self {
            feasible: false,
            status,
            schedule: None,
            stats,
            calculation_time_ms: None,
            messages: vec![message],
        }
    }

    /// 已服務請求數（無排程為 0）
    pub fn served_count(&self) -> usize {
        self.schedule.as_ref().map_or(0, Schedule::served_count)
    }
}

/// 模型規模
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStats {
    pub variables: usize,
    pub constraints: usize,
}
