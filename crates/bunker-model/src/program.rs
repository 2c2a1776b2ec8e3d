//! 抽象整數規劃模型
//!
//! 與任何求解函式庫無關的描述：帶值域與上下界的變數、具名線性約束列、
//! 單一目標函數。求解器後端負責把它轉成自己的物件模型。

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 變數識別碼（即變數在模型中的位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 變數取值，以變數識別碼為鍵
pub type Assignment = HashMap<VarId, f64>;

/// 變數值域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarDomain {
    Binary,
    Integer,
    Continuous,
}

/// 決策變數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub domain: VarDomain,
    pub lower: f64,
    pub upper: f64,
}

impl Variable {
    pub fn binary(name: String) -> Self {
        Self {
            name,
            domain: VarDomain::Binary,
            lower: 0.0,
            upper: 1.0,
        }
    }

    pub fn bounded(name: String, domain: VarDomain, lower: f64, upper: f64) -> Self {
        Self {
            name,
            domain,
            lower,
            upper,
        }
    }

    /// 檢查取值是否滿足值域與上下界
    fn admits(&self, value: f64, tolerance: f64) -> bool {
        if value < self.lower - tolerance || value > self.upper + tolerance {
            return false;
        }
        match self.domain {
            VarDomain::Continuous => true,
            VarDomain::Binary | VarDomain::Integer => (value - value.round()).abs() <= tolerance,
        }
    }
}

/// 線性表達式 Σ coef·x + constant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入一項（係數為 0 時略過）
    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
    }

    /// 以給定取值計算表達式；缺少的變數視為 None
    pub fn evaluate(&self, assignment: &Assignment) -> Option<f64> {
        self.terms
            .iter()
            .try_fold(self.constant, |acc, (var, coef)| {
                assignment.get(var).map(|value| acc + coef * value)
            })
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        let mut expr = LinearExpr::new();
        for (var, coefficient) in iter {
            expr.add_term(var, coefficient);
        }
        expr
    }
}

/// 約束關係
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    LessEq,
    GreaterEq,
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relation::LessEq => "<=",
            Relation::GreaterEq => ">=",
            Relation::Equal => "==",
        };
        f.write_str(symbol)
    }
}

/// 具名線性約束 expr (relation) rhs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(name: String, expr: LinearExpr, relation: Relation, rhs: f64) -> Self {
        Self {
            name,
            expr,
            relation,
            rhs,
        }
    }

    pub fn less_eq(name: String, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(name, expr, Relation::LessEq, rhs)
    }

    pub fn greater_eq(name: String, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(name, expr, Relation::GreaterEq, rhs)
    }

    pub fn equal(name: String, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(name, expr, Relation::Equal, rhs)
    }

    /// 檢查約束是否成立
    pub fn is_satisfied(&self, lhs: f64, tolerance: f64) -> bool {
        match self.relation {
            Relation::LessEq => lhs <= self.rhs + tolerance,
            Relation::GreaterEq => lhs >= self.rhs - tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// 最佳化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// 目標函數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub sense: Sense,
    pub expr: LinearExpr,
}

/// 取值不滿足模型的原因
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// 變數缺少取值
    Missing { variable: String },
    /// 超出上下界或不是整數
    Domain { variable: String, value: f64 },
    /// 約束不成立
    Constraint { name: String, lhs: f64, rhs: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing { variable } => write!(f, "{} 缺少取值", variable),
            Violation::Domain { variable, value } => {
                write!(f, "{} = {} 超出值域", variable, value)
            }
            Violation::Constraint { name, lhs, rhs } => {
                write!(f, "{}: 左側 {} 與右側 {} 不符", name, lhs, rhs)
            }
        }
    }
}

/// 混合整數線性規劃模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerProgram {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Objective,
}

impl IntegerProgram {
    pub fn new(sense: Sense) -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective {
                sense,
                expr: LinearExpr::new(),
            },
        }
    }

    /// 加入變數，回傳其識別碼
    pub fn add_variable(&mut self, variable: Variable) -> VarId {
        self.variables.push(variable);
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, expr: LinearExpr) {
        self.objective.expr = expr;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// 依名稱查找約束
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// 以給定取值計算目標值
    pub fn objective_value(&self, assignment: &Assignment) -> Option<f64> {
        self.objective.expr.evaluate(assignment)
    }

    /// 列出所有不滿足的變數與約束（空列表表示取值可行）
    pub fn evaluate(&self, assignment: &Assignment, tolerance: f64) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, variable) in self.variables.iter().enumerate() {
            match assignment.get(&VarId(index)) {
                None => violations.push(Violation::Missing {
                    variable: variable.name.clone(),
                }),
                Some(&value) if !variable.admits(value, tolerance) => {
                    violations.push(Violation::Domain {
                        variable: variable.name.clone(),
                        value,
                    })
                }
                Some(_) => {}
            }
        }

        for constraint in &self.constraints {
            // 缺值已在上面回報
            if let Some(lhs) = constraint.expr.evaluate(assignment) {
                if !constraint.is_satisfied(lhs, tolerance) {
                    violations.push(Violation::Constraint {
                        name: constraint.name.clone(),
                        lhs,
                        rhs: constraint.rhs,
                    });
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knapsack() -> (IntegerProgram, VarId, VarId) {
        let mut program = IntegerProgram::new(Sense::Maximize);
        let x = program.add_variable(Variable::binary("x".to_string()));
        let y = program.add_variable(Variable::bounded(
            "y".to_string(),
            VarDomain::Integer,
            0.0,
            5.0,
        ));
        program.add_constraint(Constraint::less_eq(
            "weight".to_string(),
            LinearExpr::new().with_term(x, 3.0).with_term(y, 1.0),
            4.0,
        ));
        program.set_objective(LinearExpr::new().with_term(x, 2.0).with_term(y, 1.0));
        (program, x, y)
    }

    #[test]
    fn test_build_program() {
        let (program, x, y) = knapsack();

        assert_eq!(program.variable_count(), 2);
        assert_eq!(program.constraint_count(), 1);
        assert_eq!(x, VarId(0));
        assert_eq!(y.to_string(), "v1");
        assert!(program.constraint("weight").is_some());
        assert!(program.constraint("missing").is_none());
    }

    #[test]
    fn test_zero_coefficients_are_dropped() {
        let expr: LinearExpr = vec![(VarId(0), 0.0), (VarId(1), 2.0)].into_iter().collect();
        assert_eq!(expr.terms, vec![(VarId(1), 2.0)]);
    }

    #[test]
    fn test_evaluate_feasible_assignment() {
        let (program, x, y) = knapsack();
        let assignment: Assignment = [(x, 1.0), (y, 1.0)].into_iter().collect();

        assert!(program.evaluate(&assignment, 1e-6).is_empty());
        assert_eq!(program.objective_value(&assignment), Some(3.0));
    }

    #[test]
    fn test_evaluate_reports_violations() {
        let (program, x, y) = knapsack();

        let over_weight: Assignment = [(x, 1.0), (y, 2.0)].into_iter().collect();
        let violations = program.evaluate(&over_weight, 1e-6);
        assert_eq!(violations.len(), 1);
        assert!(matches!(&violations[0], Violation::Constraint { name, .. } if name == "weight"));

        let fractional: Assignment = [(x, 0.5), (y, 0.0)].into_iter().collect();
        assert!(matches!(
            program.evaluate(&fractional, 1e-6).as_slice(),
            [Violation::Domain { .. }]
        ));

        let missing: Assignment = [(x, 1.0)].into_iter().collect();
        assert!(matches!(
            program.evaluate(&missing, 1e-6).as_slice(),
            [Violation::Missing { .. }]
        ));
        assert_eq!(program.objective_value(&missing), None);
    }
}
