//! 求解器協作介面

use std::time::Duration;

use bunker_model::{Assignment, IntegerProgram, SolveStatus};

/// 求解選項
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// 牆鐘時間上限（None 表示不限）
    pub time_limit: Option<Duration>,
}

impl SolverOptions {
    /// 建構器模式：設置時間上限
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// 求解結果
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// 求解狀態
    pub status: SolveStatus,

    /// 變數取值（僅 Optimal 時有內容）
    pub assignment: Assignment,

    /// 目標值
    pub objective_value: f64,

    /// 求解器訊息
    pub message: Option<String>,
}

impl SolveOutcome {
    /// 創建最優解結果
    pub fn optimal(assignment: Assignment, objective_value: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            assignment,
            objective_value,
            message: None,
        }
    }

    /// 創建無解結果
    pub fn without_solution(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            assignment: Assignment::new(),
            objective_value: 0.0,
            message: Some(message.into()),
        }
    }
}

/// 混合整數線性規劃求解器
///
/// 只需支援二元、有界整數與連續變數以及線性約束；不可行與無界
/// 屬於正常結果，以 `SolveStatus` 回報而非錯誤。
pub trait MilpSolver: Send + Sync {
    /// 求解器名稱
    fn name(&self) -> &str;

    /// 求解模型（阻塞）
    fn solve(&self, program: &IntegerProgram, options: &SolverOptions) -> bunker_core::Result<SolveOutcome>;
}
