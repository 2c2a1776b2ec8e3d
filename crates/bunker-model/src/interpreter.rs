//! 求解結果解讀
//!
//! 把求解器回傳的變數取值轉成排程。解讀過程會重新檢查結構性不變量，
//! 任何不一致都以 `BunkerError::Consistency` 回報，不會自行修正。

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use bunker_core::{BunkerError, Schedule, ScheduleEntry, VolumeDomain};

use crate::program::{Assignment, VarId};
use crate::{Model, SolveStatus};

/// 判斷二元值與整數值時的容差
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// 解讀結果
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// 得到排程
    Scheduled(Schedule),
    /// 求解器未給出可用解（正常結果，不是錯誤）
    Unsolved(String),
}

impl Interpretation {
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            Interpretation::Scheduled(schedule) => Some(schedule),
            Interpretation::Unsolved(_) => None,
        }
    }

    pub fn into_schedule(self) -> Option<Schedule> {
        match self {
            Interpretation::Scheduled(schedule) => Some(schedule),
            Interpretation::Unsolved(_) => None,
        }
    }

    pub fn is_unsolved(&self) -> bool {
        matches!(self, Interpretation::Unsolved(_))
    }
}

/// 以預設容差解讀
pub fn interpret(
    model: &Model,
    assignment: &Assignment,
    status: SolveStatus,
) -> bunker_core::Result<Interpretation> {
    SolutionInterpreter::default().interpret(model, assignment, status)
}

/// 求解結果解讀器
#[derive(Debug, Clone, Copy)]
pub struct SolutionInterpreter {
    tolerance: f64,
}

impl Default for SolutionInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

/// 單艘船在各請求上的解讀值
struct BunkerPlan {
    serve: Vec<bool>,
    refill: Vec<bool>,
    volume: Vec<Decimal>,
}

impl SolutionInterpreter {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// 解讀求解結果
    pub fn interpret(
        &self,
        model: &Model,
        assignment: &Assignment,
        status: SolveStatus,
    ) -> bunker_core::Result<Interpretation> {
        match status {
            SolveStatus::Optimal => {}
            SolveStatus::Infeasible => {
                return Ok(Interpretation::Unsolved("模型不可行".to_string()));
            }
            SolveStatus::Unbounded => {
                return Ok(Interpretation::Unsolved("模型無界".to_string()));
            }
            SolveStatus::NotSolved => {
                return Ok(Interpretation::Unsolved("求解器未給出解".to_string()));
            }
        }

        let plans = (0..model.bunkers().len())
            .map(|b| self.read_bunker(model, assignment, b))
            .collect::<bunker_core::Result<Vec<_>>>()?;

        check_refills(model, &plans)?;
        let mut entries = assign_requests(model, &plans)?;
        self.replay_tanks(model, &plans, &mut entries)?;

        let objective_value = model
            .program()
            .objective_value(assignment)
            .unwrap_or_default();
        let schedule = Schedule::new(entries, objective_value);

        tracing::debug!("解讀完成：{}", schedule);
        Ok(Interpretation::Scheduled(schedule))
    }

    fn read_bunker(
        &self,
        model: &Model,
        assignment: &Assignment,
        b: usize,
    ) -> bunker_core::Result<BunkerPlan> {
        let layout = model.layout();
        let n = model.requests().len();

        let mut plan = BunkerPlan {
            serve: Vec::with_capacity(n),
            refill: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
        };
        let tolerance = Decimal::from_f64(self.tolerance).unwrap_or_default();
        for i in 0..n {
            let refill = self.flag(model, assignment, layout.refill(b, i))?;
            let mut volume = self.volume(model, assignment, layout.refill_volume(b, i))?;
            // 未標記補給時，容差內的油量視為求解器雜訊
            if !refill && volume <= tolerance {
                volume = Decimal::ZERO;
            }
            plan.serve.push(self.flag(model, assignment, layout.serve(b, i))?);
            plan.refill.push(refill);
            plan.volume.push(volume);
        }
        Ok(plan)
    }

    fn value(&self, model: &Model, assignment: &Assignment, id: VarId) -> bunker_core::Result<f64> {
        assignment
            .get(&id)
            .copied()
            .ok_or_else(|| BunkerError::Consistency(format!("{} 缺少取值", variable_name(model, id))))
    }

    fn flag(&self, model: &Model, assignment: &Assignment, id: VarId) -> bunker_core::Result<bool> {
        let value = self.value(model, assignment, id)?;
        if value.abs() <= self.tolerance {
            Ok(false)
        } else if (value - 1.0).abs() <= self.tolerance {
            Ok(true)
        } else {
            Err(BunkerError::Consistency(format!(
                "{} = {} 不是二元值",
                variable_name(model, id),
                value
            )))
        }
    }

    fn volume(&self, model: &Model, assignment: &Assignment, id: VarId) -> bunker_core::Result<Decimal> {
        let value = self.value(model, assignment, id)?;
        let value = match model.formulation().refill_domain {
            VolumeDomain::Integer => value.round(),
            VolumeDomain::Continuous => value,
        };
        Decimal::from_f64(value)
            .map(|volume| volume.round_dp(6).max(Decimal::ZERO))
            .ok_or_else(|| {
                BunkerError::Consistency(format!(
                    "{} = {} 無法轉為油量",
                    variable_name(model, id),
                    value
                ))
            })
    }

    /// 逐船重演油量：服務後不得見底，補給後不得溢出，
    /// 補給必須放進最後一次服務結束到下一筆請求開始的空檔
    fn replay_tanks(
        &self,
        model: &Model,
        plans: &[BunkerPlan],
        entries: &mut [ScheduleEntry],
    ) -> bunker_core::Result<()> {
        let tolerance = Decimal::from_f64(self.tolerance).unwrap_or_default();

        for (b, (bunker, plan)) in model.bunkers().iter().zip(plans).enumerate() {
            let capacity = Decimal::from(bunker.capacity);
            let mut level = Decimal::from(bunker.initial_fuel);
            let mut last_end: Option<i64> = None;

            for (i, request) in model.requests().iter().enumerate() {
                if plan.serve[i] {
                    let end = request.end_time();
                    last_end = Some(last_end.map_or(end, |previous| previous.max(end)));
                    let before = level;
                    level -= Decimal::from(request.volume);
                    if level < -tolerance {
                        return Err(BunkerError::Consistency(format!(
                            "加油船 {} 服務請求 {} 後油量為 {}",
                            b, i, level
                        )));
                    }
                    let entry = entries[i].clone().with_tank_levels(before, level);
                    entries[i] = entry;
                }

                let next = model.requests().get(i + 1);
                if let (true, Some(end), Some(next)) = (plan.refill[i], last_end, next) {
                    let window = next.start_time - end;
                    let duration = bunker.refill_duration(plan.volume[i]);
                    if duration > Decimal::from(window) + tolerance {
                        return Err(BunkerError::Consistency(format!(
                            "加油船 {} 在請求 {} 前補給 {} 需時 {}，但空檔只有 {}（最多可補給 {}）",
                            b,
                            i + 1,
                            plan.volume[i],
                            duration,
                            window,
                            bunker.max_refill_within(window)
                        )));
                    }
                }

                level += plan.volume[i];
                if level > capacity + tolerance {
                    return Err(BunkerError::Consistency(format!(
                        "加油船 {} 在請求 {} 後補給至 {}，超過容量 {}",
                        b, i, level, capacity
                    )));
                }
            }
        }
        Ok(())
    }
}

/// 補給必須有旗標、不得在最後一筆之後，且之後由同一艘船服務下一筆
fn check_refills(model: &Model, plans: &[BunkerPlan]) -> bunker_core::Result<()> {
    let n = model.requests().len();
    for (b, plan) in plans.iter().enumerate() {
        for i in 0..n {
            if plan.volume[i] > Decimal::ZERO && !plan.refill[i] {
                return Err(BunkerError::Consistency(format!(
                    "加油船 {} 在請求 {} 後補給 {} 但未標記補給",
                    b, i, plan.volume[i]
                )));
            }
            if !plan.refill[i] {
                continue;
            }
            if i + 1 == n {
                return Err(BunkerError::Consistency(format!(
                    "加油船 {} 在最後一筆請求後補給",
                    b
                )));
            }
            if !plan.serve[i + 1] {
                return Err(BunkerError::Consistency(format!(
                    "加油船 {} 在請求 {} 後補給，但未服務請求 {}",
                    b,
                    i,
                    i + 1
                )));
            }
        }
    }
    Ok(())
}

/// 每筆請求找出服務的船，多於一艘即為不一致
fn assign_requests(model: &Model, plans: &[BunkerPlan]) -> bunker_core::Result<Vec<ScheduleEntry>> {
    (0..model.requests().len())
        .map(|i| {
            let servers: Vec<usize> = plans
                .iter()
                .enumerate()
                .filter(|(_, plan)| plan.serve[i])
                .map(|(b, _)| b)
                .collect();

            match servers.as_slice() {
                [] => Ok(ScheduleEntry::unserved(i)),
                [b] => {
                    let entry = ScheduleEntry::served(i, *b);
                    if i > 0 && plans[*b].refill[i - 1] {
                        let volume = plans[*b].volume[i - 1];
                        let duration = model.bunkers()[*b].refill_duration(volume).round_dp(6);
                        Ok(entry.with_refill(volume, duration))
                    } else {
                        Ok(entry)
                    }
                }
                _ => Err(BunkerError::Consistency(format!(
                    "請求 {} 同時由加油船 {:?} 服務",
                    i, servers
                ))),
            }
        })
        .collect()
}

fn variable_name(model: &Model, id: VarId) -> String {
    model
        .program()
        .variable(id)
        .map(|v| v.name.clone())
        .unwrap_or_else(|| id.to_string())
}
