//! `good_lp` 求解器後端
//!
//! 把抽象整數規劃逐項轉為 `good_lp` 的變數、約束與目標，並以純 Rust 的
//! microlp 引擎求解。設有時間上限時，求解在獨立執行緒中進行，
//! 逾時即回報 `NotSolved`（背景執行緒自行結束）。

use std::sync::mpsc;
use std::thread;

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use bunker_model::program::{Relation, Sense, VarDomain};
use bunker_model::{Assignment, IntegerProgram, SolveStatus, VarId};

use crate::solver::{MilpSolver, SolveOutcome, SolverOptions};

/// 以 `good_lp` 預設後端求解
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for GoodLpSolver {
    fn name(&self) -> &str {
        "good_lp/microlp"
    }

    fn solve(&self, program: &IntegerProgram, options: &SolverOptions) -> bunker_core::Result<SolveOutcome> {
        let Some(limit) = options.time_limit else {
            return Ok(run(program));
        };

        let (tx, rx) = mpsc::channel();
        let job = program.clone();
        thread::Builder::new()
            .name("milp-worker".into())
            .spawn(move || {
                // 接收端可能已因逾時而放棄
                let _ = tx.send(run(&job));
            })
            .map_err(|e| bunker_core::BunkerError::Solver(format!("無法啟動求解執行緒: {}", e)))?;

        match rx.recv_timeout(limit) {
            Ok(outcome) => Ok(outcome),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!("求解超過時間上限 {:?}", limit);
                Ok(SolveOutcome::without_solution(
                    SolveStatus::NotSolved,
                    format!("超過時間上限 {:?}", limit),
                ))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(bunker_core::BunkerError::Solver(
                "求解執行緒異常結束".to_string(),
            )),
        }
    }
}

fn run(program: &IntegerProgram) -> SolveOutcome {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = program
        .variables()
        .iter()
        .map(|v| {
            let definition = match v.domain {
                VarDomain::Binary => variable().binary(),
                VarDomain::Integer => variable().integer().min(v.lower).max(v.upper),
                VarDomain::Continuous => variable().min(v.lower).max(v.upper),
            };
            vars.add(definition.name(v.name.clone()))
        })
        .collect();

    let to_expression = |expr: &bunker_model::program::LinearExpr| -> Expression {
        expr.terms
            .iter()
            .map(|(id, coef)| *coef * handles[id.index()])
            .sum::<Expression>()
            + expr.constant
    };

    let objective = to_expression(&program.objective().expr);
    let mut problem = match program.objective().sense {
        Sense::Maximize => vars.maximise(objective),
        Sense::Minimize => vars.minimise(objective),
    }
    .using(default_solver);

    for row in program.constraints() {
        let lhs = to_expression(&row.expr);
        let rhs = row.rhs;
        problem = match row.relation {
            Relation::LessEq => problem.with(constraint!(lhs <= rhs)),
            Relation::GreaterEq => problem.with(constraint!(lhs >= rhs)),
            Relation::Equal => problem.with(constraint!(lhs == rhs)),
        };
    }

    match problem.solve() {
        Ok(solution) => {
            let assignment: Assignment = handles
                .iter()
                .enumerate()
                .map(|(index, handle)| (VarId(index), solution.value(*handle)))
                .collect();
            let objective_value = program.objective_value(&assignment).unwrap_or_default();
            SolveOutcome::optimal(assignment, objective_value)
        }
        Err(ResolutionError::Infeasible) => {
            SolveOutcome::without_solution(SolveStatus::Infeasible, "模型不可行")
        }
        Err(ResolutionError::Unbounded) => {
            SolveOutcome::without_solution(SolveStatus::Unbounded, "模型無界")
        }
        Err(other) => SolveOutcome::without_solution(SolveStatus::NotSolved, other.to_string()),
    }
}
