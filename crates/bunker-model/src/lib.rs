//! # Bunker Model
//!
//! 整數規劃模型建構與求解結果解讀

pub mod builder;
pub mod interpreter;
pub mod layout;
pub mod program;
pub mod validation;

use bunker_core::{Bunker, FormulationConfig, Request};

// Re-export 主要類型
pub use builder::{build, build_with, ModelBuilder};
pub use interpreter::{interpret, Interpretation, SolutionInterpreter};
pub use layout::{VarKind, VariableLayout};
pub use program::{Assignment, IntegerProgram, VarId};

/// 求解狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SolveStatus {
    /// 找到最優解
    Optimal,
    /// 不可行
    Infeasible,
    /// 無界
    Unbounded,
    /// 未求解（逾時或求解器失敗）
    NotSolved,
}

/// 建構完成的模型：整數規劃本體 + 變數配置 + 原始輸入
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    program: IntegerProgram,
    layout: VariableLayout,
    requests: Vec<Request>,
    bunkers: Vec<Bunker>,
    formulation: FormulationConfig,
}

impl Model {
    pub(crate) fn new(
        program: IntegerProgram,
        layout: VariableLayout,
        requests: Vec<Request>,
        bunkers: Vec<Bunker>,
        formulation: FormulationConfig,
    ) -> Self {
        Self {
            program,
            layout,
            requests,
            bunkers,
            formulation,
        }
    }

    pub fn program(&self) -> &IntegerProgram {
        &self.program
    }

    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn bunkers(&self) -> &[Bunker] {
        &self.bunkers
    }

    pub fn formulation(&self) -> &FormulationConfig {
        &self.formulation
    }
}
