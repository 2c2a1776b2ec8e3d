//! 模型建構器
//!
//! 把請求列表與船隊參數轉成整數規劃模型。每條約束只依賴輸入陣列，
//! 油艙餘量的前綴和按 (船, 請求) 各自計算，不共享累加器，
//! 因此同樣的輸入必定產生結構相同的模型。

use bunker_core::{BigM, Bunker, BunkerError, FormulationConfig, Request, TieBreak, VolumeDomain};

use crate::layout::{VarKind, VariableLayout};
use crate::program::{Constraint, IntegerProgram, LinearExpr, Sense, VarDomain, Variable};
use crate::validation::validate_instance;
use crate::Model;

/// 以預設選項建構模型
pub fn build(requests: &[Request], bunkers: &[Bunker]) -> bunker_core::Result<Model> {
    ModelBuilder::default().build(requests, bunkers)
}

/// 以指定選項建構模型
pub fn build_with(
    requests: &[Request],
    bunkers: &[Bunker],
    formulation: &FormulationConfig,
) -> bunker_core::Result<Model> {
    ModelBuilder::new(*formulation).build(requests, bunkers)
}

/// 模型建構器
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    formulation: FormulationConfig,
}

impl ModelBuilder {
    /// 創建新的建構器
    pub fn new(formulation: FormulationConfig) -> Self {
        Self { formulation }
    }

    pub fn formulation(&self) -> &FormulationConfig {
        &self.formulation
    }

    /// 建構模型（純函數，不呼叫求解器）
    pub fn build(&self, requests: &[Request], bunkers: &[Bunker]) -> bunker_core::Result<Model> {
        validate_instance(requests, bunkers)?;
        self.check_big_m(requests, bunkers)?;

        tracing::debug!(
            "開始建構模型：請求 {} 筆，加油船 {} 艘",
            requests.len(),
            bunkers.len()
        );

        let layout = VariableLayout::new(bunkers.len(), requests.len());
        let mut program = IntegerProgram::new(Sense::Maximize);

        // Step 1: 決策變數
        self.add_variables(&mut program, &layout, requests, bunkers);

        // Step 2: 油艙餘量
        for (b, bunker) in bunkers.iter().enumerate() {
            for i in 0..requests.len() {
                for constraint in tank_constraints(&layout, requests, bunker, b, i) {
                    program.add_constraint(constraint);
                }
            }
        }

        // Step 3: 補給油量受補給旗標限制
        for (b, bunker) in bunkers.iter().enumerate() {
            for i in 0..requests.len() {
                program.add_constraint(refill_gate(&layout, bunker, b, i));
            }
        }

        // Step 4: 補給時間窗口
        for (b, bunker) in bunkers.iter().enumerate() {
            for i in 1..requests.len() {
                let big_m = self.big_m_for(bunker, &requests[i - 1], &requests[i]);
                program.add_constraint(refill_window(&layout, requests, bunker, b, i, big_m));
                program.add_constraint(refill_lead_in(&layout, b, i));

                // 跳過 i−1 時，空檔從最後服務的請求結束起算
                for k in later_ending_predecessors(requests, i) {
                    let big_m = self.big_m_for(bunker, &requests[k], &requests[i]);
                    program.add_constraint(refill_window_after(
                        &layout, requests, bunker, b, k, i, big_m,
                    ));
                }
            }
        }

        // Step 5: 同一艘船不能服務時間重疊的請求
        for b in 0..bunkers.len() {
            for constraint in overlap_constraints(&layout, requests, b) {
                program.add_constraint(constraint);
            }
        }

        // Step 6: 最後一筆請求後不補給
        let last = requests.len() - 1;
        for b in 0..bunkers.len() {
            program.add_constraint(Constraint::equal(
                format!("terminal[b={}]", b),
                LinearExpr::new().with_term(layout.refill(b, last), 1.0),
                0.0,
            ));
        }

        // Step 7: 每筆請求至多一艘船
        if bunkers.len() > 1 {
            for i in 0..requests.len() {
                let expr = (0..bunkers.len())
                    .map(|b| (layout.serve(b, i), 1.0))
                    .collect();
                program.add_constraint(Constraint::less_eq(
                    format!("single_assignment[i={}]", i),
                    expr,
                    1.0,
                ));
            }
            if self.formulation.cap_total_served {
                program.add_constraint(Constraint::less_eq(
                    "total_served".to_string(),
                    all_serve_terms(&layout).map(|var| (var, 1.0)).collect(),
                    requests.len() as f64,
                ));
            }
        }

        // Step 8: 目標函數
        program.set_objective(self.objective(&layout));

        tracing::debug!(
            "模型建構完成：變數 {} 個，約束 {} 條",
            program.variable_count(),
            program.constraint_count()
        );

        Ok(Model::new(
            program,
            layout,
            requests.to_vec(),
            bunkers.to_vec(),
            self.formulation,
        ))
    }

    fn add_variables(
        &self,
        program: &mut IntegerProgram,
        layout: &VariableLayout,
        requests: &[Request],
        bunkers: &[Bunker],
    ) {
        let volume_domain = match self.formulation.refill_domain {
            VolumeDomain::Integer => VarDomain::Integer,
            VolumeDomain::Continuous => VarDomain::Continuous,
        };

        for (b, bunker) in bunkers.iter().enumerate() {
            for i in 0..requests.len() {
                let serve =
                    program.add_variable(Variable::binary(VariableLayout::name(VarKind::Serve, b, i)));
                let refill =
                    program.add_variable(Variable::binary(VariableLayout::name(VarKind::Refill, b, i)));
                let volume = program.add_variable(Variable::bounded(
                    VariableLayout::name(VarKind::RefillVolume, b, i),
                    volume_domain,
                    0.0,
                    bunker.capacity as f64,
                ));
                debug_assert_eq!(serve, layout.serve(b, i));
                debug_assert_eq!(refill, layout.refill(b, i));
                debug_assert_eq!(volume, layout.refill_volume(b, i));
            }
        }
    }

    /// 固定 Big-M 不得小於任何一條窗口約束所需的推導值
    fn check_big_m(&self, requests: &[Request], bunkers: &[Bunker]) -> bunker_core::Result<()> {
        let BigM::Fixed(value) = self.formulation.big_m else {
            return Ok(());
        };

        let windows: Vec<(usize, usize)> = (1..requests.len())
            .flat_map(|i| {
                std::iter::once(i - 1)
                    .chain(later_ending_predecessors(requests, i))
                    .map(move |from| (from, i))
            })
            .collect();
        let required = bunkers
            .iter()
            .flat_map(|bunker| {
                windows
                    .iter()
                    .map(move |&(from, i)| derived_big_m(bunker, &requests[from], &requests[i]))
            })
            .fold(0.0_f64, f64::max);

        if (value as f64) < required {
            return Err(BunkerError::InvalidInput(format!(
                "Big-M 常數 {} 小於所需的 {}",
                value, required
            )));
        }
        Ok(())
    }

    fn big_m_for(&self, bunker: &Bunker, previous: &Request, next: &Request) -> f64 {
        match self.formulation.big_m {
            BigM::Derived => derived_big_m(bunker, previous, next),
            BigM::Fixed(value) => value as f64,
        }
    }

    fn objective(&self, layout: &VariableLayout) -> LinearExpr {
        let n = layout.request_count();
        match self.formulation.tie_break {
            TieBreak::None => all_serve_terms(layout).map(|var| (var, 1.0)).collect(),
            TieBreak::FewestRefills => {
                // 主權重大於補給旗標總數，次要項不會改變服務數的最優值
                let weight = (layout.bunker_count() * n + 1) as f64;
                let mut expr: LinearExpr = all_serve_terms(layout).map(|var| (var, weight)).collect();
                for b in 0..layout.bunker_count() {
                    for i in 0..n {
                        expr.add_term(layout.refill(b, i), -1.0);
                    }
                }
                expr
            }
            TieBreak::EarliestRequests => {
                let weight = (n * (n + 1) / 2 + 1) as f64;
                (0..layout.bunker_count())
                    .flat_map(|b| (0..n).map(move |i| (b, i)))
                    .map(|(b, i)| (layout.serve(b, i), weight + (n - i) as f64))
                    .collect()
            }
        }
    }
}

/// 使窗口約束在任一旗標為 0 時鬆弛所需的最小 M：max(0, F·C − C·gap)，
/// gap 為 `previous` 結束到 `next` 開始的空檔
pub fn derived_big_m(bunker: &Bunker, previous: &Request, next: &Request) -> f64 {
    let capacity = bunker.capacity as f64;
    let gap = previous.gap_until(next) as f64;
    (bunker.full_refill_duration as f64 * capacity - capacity * gap).max(0.0)
}

fn all_serve_terms(layout: &VariableLayout) -> impl Iterator<Item = crate::program::VarId> + '_ {
    (0..layout.bunker_count())
        .flat_map(move |b| (0..layout.request_count()).map(move |i| layout.serve(b, i)))
}

/// 前綴餘量 Σ_{j≤i}(refill_volume[b,j] − serve[b,j]·volume[j])；
/// `include_last_refill` 為 false 時不含請求 i 之後的補給
fn balance(
    layout: &VariableLayout,
    requests: &[Request],
    b: usize,
    i: usize,
    include_last_refill: bool,
) -> LinearExpr {
    requests[..=i]
        .iter()
        .enumerate()
        .flat_map(|(j, request)| {
            let refill = if j < i || include_last_refill { 1.0 } else { 0.0 };
            [
                (layout.refill_volume(b, j), refill),
                (layout.serve(b, j), -(request.volume as f64)),
            ]
        })
        .collect()
}

/// 油艙不溢出、不見底
///
/// - `tank_upper`：補給後油量不超過容量
/// - `tank_service`：服務 i 之後、補給之前油量仍非負
///
/// 補給油量非負，含補給的前綴餘量必不低於 `tank_service` 的餘量，
/// 因此不需要另一條下界。
fn tank_constraints(
    layout: &VariableLayout,
    requests: &[Request],
    bunker: &Bunker,
    b: usize,
    i: usize,
) -> [Constraint; 2] {
    [
        Constraint::less_eq(
            format!("tank_upper[b={},i={}]", b, i),
            balance(layout, requests, b, i, true),
            bunker.initial_headroom() as f64,
        ),
        Constraint::greater_eq(
            format!("tank_service[b={},i={}]", b, i),
            balance(layout, requests, b, i, false),
            -(bunker.initial_fuel as f64),
        ),
    ]
}

/// refill_volume[b,i] − C·refill[b,i] ≤ 0
fn refill_gate(layout: &VariableLayout, bunker: &Bunker, b: usize, i: usize) -> Constraint {
    Constraint::less_eq(
        format!("refill_gate[b={},i={}]", b, i),
        LinearExpr::new()
            .with_term(layout.refill_volume(b, i), 1.0)
            .with_term(layout.refill(b, i), -(bunker.capacity as f64)),
        0.0,
    )
}

/// 補給與服務相鄰時，補給必須在空檔內完成：
/// F·refill_volume[b,i−1] + M·serve[b,i] + M·refill[b,i−1] ≤ C·gap + 2M
fn refill_window(
    layout: &VariableLayout,
    requests: &[Request],
    bunker: &Bunker,
    b: usize,
    i: usize,
    big_m: f64,
) -> Constraint {
    let gap = requests[i - 1].gap_until(&requests[i]) as f64;
    Constraint::less_eq(
        format!("refill_window[b={},i={}]", b, i),
        LinearExpr::new()
            .with_term(
                layout.refill_volume(b, i - 1),
                bunker.full_refill_duration as f64,
            )
            .with_term(layout.serve(b, i), big_m)
            .with_term(layout.refill(b, i - 1), big_m),
        bunker.capacity as f64 * gap + 2.0 * big_m,
    )
}

/// 排在 i−1 之前、但結束得比 i−1 晚的請求 k（必與 i−1 重疊）
fn later_ending_predecessors(requests: &[Request], i: usize) -> impl Iterator<Item = usize> + '_ {
    let previous_end = requests[i - 1].end_time();
    (0..i.saturating_sub(1)).filter(move |&k| requests[k].end_time() > previous_end)
}

/// 服務 k、跳過 i−1、補給後服務 i 時，補給必須放進 end[k] 到 start[i] 的空檔：
/// F·refill_volume[b,i−1] + M·serve[b,k] + M·serve[b,i] + M·refill[b,i−1] ≤ C·gap + 3M
fn refill_window_after(
    layout: &VariableLayout,
    requests: &[Request],
    bunker: &Bunker,
    b: usize,
    k: usize,
    i: usize,
    big_m: f64,
) -> Constraint {
    let gap = requests[k].gap_until(&requests[i]) as f64;
    Constraint::less_eq(
        format!("refill_window[b={},i={},k={}]", b, i, k),
        LinearExpr::new()
            .with_term(
                layout.refill_volume(b, i - 1),
                bunker.full_refill_duration as f64,
            )
            .with_term(layout.serve(b, k), big_m)
            .with_term(layout.serve(b, i), big_m)
            .with_term(layout.refill(b, i - 1), big_m),
        bunker.capacity as f64 * gap + 3.0 * big_m,
    )
}

/// 補給之後必須由同一艘船服務下一筆請求：refill[b,i−1] − serve[b,i] ≤ 0
fn refill_lead_in(layout: &VariableLayout, b: usize, i: usize) -> Constraint {
    Constraint::less_eq(
        format!("refill_lead_in[b={},i={}]", b, i),
        LinearExpr::new()
            .with_term(layout.refill(b, i - 1), 1.0)
            .with_term(layout.serve(b, i), -1.0),
        0.0,
    )
}

/// 時間重疊的請求對至多服務一筆
fn overlap_constraints(layout: &VariableLayout, requests: &[Request], b: usize) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    for (i, request) in requests.iter().enumerate() {
        // 請求按開始時間排序，第一個不重疊者之後都不重疊
        for (j, _) in requests
            .iter()
            .enumerate()
            .skip(i + 1)
            .take_while(|(_, later)| request.overlaps(later))
        {
            constraints.push(Constraint::less_eq(
                format!("overlap[b={},i={},j={}]", b, i, j),
                LinearExpr::new()
                    .with_term(layout.serve(b, i), 1.0)
                    .with_term(layout.serve(b, j), 1.0),
                1.0,
            ));
        }
    }
    constraints
}
