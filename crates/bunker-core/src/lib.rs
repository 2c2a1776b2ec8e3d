//! # Bunker Core
//!
//! 核心資料模型與類型定義

pub mod bunker;
pub mod config;
pub mod loading;
pub mod request;
pub mod sample;
pub mod schedule;

// Re-export 主要類型
pub use bunker::Bunker;
pub use config::{BigM, FormulationConfig, PlannerConfig, TieBreak, VolumeDomain};
pub use loading::RequestLoader;
pub use request::Request;
pub use schedule::{Schedule, ScheduleEntry};

/// 排程錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum BunkerError {
    #[error("無效的輸入: {0}")]
    InvalidInput(String),

    #[error("解與模型不一致: {0}")]
    Consistency(String),

    #[error("求解器錯誤: {0}")]
    Solver(String),

    #[error("讀取錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 解析錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BunkerError>;
