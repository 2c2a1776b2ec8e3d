//! 排程主流程

use bunker_core::{Bunker, PlannerConfig, Request};
use bunker_model::{build_with, interpret, Interpretation};
use rayon::prelude::*;

use crate::lp::GoodLpSolver;
use crate::solver::{MilpSolver, SolverOptions};
use crate::{ModelStats, PlanOutcome};

/// 假設情境：一組請求與一支船隊
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub requests: Vec<Request>,
    pub bunkers: Vec<Bunker>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, requests: Vec<Request>, bunkers: Vec<Bunker>) -> Self {
        Self {
            name: name.into(),
            requests,
            bunkers,
        }
    }
}

/// 排程器
pub struct Planner<S: MilpSolver = GoodLpSolver> {
    config: PlannerConfig,
    solver: S,
    options: SolverOptions,
}

impl Planner<GoodLpSolver> {
    /// 以預設求解器創建排程器
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_solver(config, GoodLpSolver::new())
    }
}

impl<S: MilpSolver> Planner<S> {
    /// 以指定求解器創建排程器
    pub fn with_solver(config: PlannerConfig, solver: S) -> Self {
        Self {
            config,
            solver,
            options: SolverOptions::default(),
        }
    }

    /// 建構器模式：設置求解選項
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 以配置中的同質船隊排程
    pub fn plan(&self, requests: &[Request]) -> bunker_core::Result<PlanOutcome> {
        self.config.validate()?;
        self.plan_fleet(requests, &self.config.bunkers())
    }

    /// 以指定船隊排程（可為異質船隊）
    pub fn plan_fleet(&self, requests: &[Request], bunkers: &[Bunker]) -> bunker_core::Result<PlanOutcome> {
        tracing::info!(
            "開始排程：請求 {} 筆，加油船 {} 艘，求解器 {}",
            requests.len(),
            bunkers.len(),
            self.solver.name()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 建模
        tracing::debug!("Step 1: 建構模型");
        let model = build_with(requests, bunkers, &self.config.formulation)?;
        let stats = ModelStats {
            variables: model.program().variable_count(),
            constraints: model.program().constraint_count(),
        };

        // Step 2: 求解
        tracing::debug!("Step 2: 求解");
        let outcome = self.solver.solve(model.program(), &self.options)?;
        tracing::debug!(
            "求解狀態: {:?}，目標值: {}",
            outcome.status,
            outcome.objective_value
        );

        // Step 3: 解讀
        tracing::debug!("Step 3: 解讀結果");
        let mut result = match interpret(&model, &outcome.assignment, outcome.status)? {
            Interpretation::Scheduled(schedule) => {
                tracing::info!("排程完成：{}", schedule);
                PlanOutcome::feasible(schedule, stats)
            }
            Interpretation::Unsolved(reason) => {
                let message = match outcome.message {
                    Some(detail) if detail != reason => format!("{}（{}）", reason, detail),
                    _ => reason,
                };
                tracing::warn!("未得到排程: {}", message);
                PlanOutcome::unsolved(outcome.status, stats, message)
            }
        };
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("排程耗時 {:?}", start_time.elapsed());
        Ok(result)
    }

    /// 並行求解多個互不相關的情境，結果順序與輸入相同
    pub fn plan_scenarios(&self, scenarios: &[Scenario]) -> Vec<(String, bunker_core::Result<PlanOutcome>)> {
        tracing::info!("並行求解 {} 個情境", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| {
                (
                    scenario.name.clone(),
                    self.plan_fleet(&scenario.requests, &scenario.bunkers),
                )
            })
            .collect()
    }
}
