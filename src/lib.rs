//! # Bunker
//!
//! 加油船排程：把加油請求分派給加油船，並決定何時補給。
//!
//! ```no_run
//! use bunker::prelude::*;
//!
//! let planner = Planner::new(bunker::sample::default_config());
//! let outcome = planner.plan(&bunker::sample::default_requests())?;
//! println!("{}", outcome.schedule.unwrap());
//! # Ok::<(), bunker::BunkerError>(())
//! ```

pub use bunker_core::{loading, sample};
pub use bunker_core::{
    BigM, Bunker, BunkerError, FormulationConfig, PlannerConfig, Request, RequestLoader, Result,
    Schedule, ScheduleEntry, TieBreak, VolumeDomain,
};
pub use bunker_model::{build, build_with, interpret, Interpretation, Model, SolveStatus};
pub use bunker_optimizer::{
    GoodLpSolver, MilpSolver, ModelStats, PlanOutcome, Planner, Scenario, SolveOutcome,
    SolverOptions,
};

/// 常用類型
pub mod prelude {
    pub use bunker_core::{Bunker, FormulationConfig, PlannerConfig, Request, Schedule, TieBreak};
    pub use bunker_optimizer::{PlanOutcome, Planner, SolverOptions};
}
