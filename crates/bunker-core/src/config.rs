//! 排程配置模型

use serde::{Deserialize, Serialize};

use crate::{Bunker, BunkerError};

/// 船隊與排程參數配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 加油船數量（1 即單船變體）
    pub bunker_count: usize,

    /// 每艘船的油艙容量
    pub capacity: i64,

    /// 空艙加滿所需時間
    pub full_refill_duration: i64,

    /// 初始油量（None 表示滿艙）
    #[serde(default)]
    pub initial_fuel: Option<i64>,

    /// 模型建構選項
    #[serde(default)]
    pub formulation: FormulationConfig,
}

impl PlannerConfig {
    /// 創建新的配置
    pub fn new(bunker_count: usize, capacity: i64, full_refill_duration: i64) -> Self {
        Self {
            bunker_count,
            capacity,
            full_refill_duration,
            initial_fuel: None,
            formulation: FormulationConfig::default(),
        }
    }

    /// 建構器模式：設置初始油量
    pub fn with_initial_fuel(mut self, initial_fuel: i64) -> Self {
        self.initial_fuel = Some(initial_fuel);
        self
    }

    /// 建構器模式：設置模型建構選項
    pub fn with_formulation(mut self, formulation: FormulationConfig) -> Self {
        self.formulation = formulation;
        self
    }

    /// 建構器模式：設置船數
    pub fn with_bunker_count(mut self, bunker_count: usize) -> Self {
        self.bunker_count = bunker_count;
        self
    }

    /// 從 JSON 字串載入配置
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 檢查配置是否合法
    pub fn validate(&self) -> crate::Result<()> {
        if self.bunker_count == 0 {
            return Err(BunkerError::InvalidInput(
                "加油船數量必須至少為 1".to_string(),
            ));
        }
        if self.capacity <= 0 {
            return Err(BunkerError::InvalidInput(format!(
                "油艙容量必須為正數: {}",
                self.capacity
            )));
        }
        if self.full_refill_duration <= 0 {
            return Err(BunkerError::InvalidInput(format!(
                "滿艙補給時間必須為正數: {}",
                self.full_refill_duration
            )));
        }
        if let Some(fuel) = self.initial_fuel {
            if fuel < 0 || fuel > self.capacity {
                return Err(BunkerError::InvalidInput(format!(
                    "初始油量 {} 超出範圍 [0, {}]",
                    fuel, self.capacity
                )));
            }
        }
        Ok(())
    }

    /// 產生同質船隊
    pub fn bunkers(&self) -> Vec<Bunker> {
        let bunker = Bunker::new(self.capacity, self.full_refill_duration);
        let bunker = match self.initial_fuel {
            Some(fuel) => bunker.with_initial_fuel(fuel),
            None => bunker,
        };
        vec![bunker; self.bunker_count]
    }
}

/// 模型建構選項
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulationConfig {
    /// Big-M 常數策略
    pub big_m: BigM,

    /// 同分解的次要目標
    pub tie_break: TieBreak,

    /// 補給油量變數的值域
    pub refill_domain: VolumeDomain,

    /// 多船時是否加入總服務數上限（Σ serve ≤ n）
    pub cap_total_served: bool,
}

impl Default for FormulationConfig {
    fn default() -> Self {
        Self {
            big_m: BigM::Derived,
            tie_break: TieBreak::None,
            refill_domain: VolumeDomain::Integer,
            cap_total_served: true,
        }
    }
}

impl FormulationConfig {
    /// 建構器模式：設置 Big-M 策略
    pub fn with_big_m(mut self, big_m: BigM) -> Self {
        self.big_m = big_m;
        self
    }

    /// 建構器模式：設置次要目標
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// 建構器模式：設置補給油量值域
    pub fn with_refill_domain(mut self, domain: VolumeDomain) -> Self {
        self.refill_domain = domain;
        self
    }

    /// 建構器模式：設置總服務數上限
    pub fn with_cap_total_served(mut self, enabled: bool) -> Self {
        self.cap_total_served = enabled;
        self
    }
}

/// Big-M 常數策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BigM {
    /// 每條約束取使其鬆弛所需的最小值
    Derived,
    /// 使用固定常數（不得小於推導值）
    Fixed(i64),
}

/// 同分解的次要目標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// 不加次要目標，由求解器決定
    None,
    /// 補給次數最少
    FewestRefills,
    /// 優先服務較早的請求
    EarliestRequests,
}

/// 補給油量變數值域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeDomain {
    /// 整數
    Integer,
    /// 連續
    Continuous,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_config() {
        let config = PlannerConfig::new(1, 100, 30);

        assert_eq!(config.bunker_count, 1);
        assert_eq!(config.formulation.big_m, BigM::Derived);
        assert_eq!(config.formulation.tie_break, TieBreak::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PlannerConfig::new(1, 100, 30)
            .with_bunker_count(3)
            .with_initial_fuel(50)
            .with_formulation(
                FormulationConfig::default()
                    .with_tie_break(TieBreak::FewestRefills)
                    .with_refill_domain(VolumeDomain::Continuous),
            );

        let bunkers = config.bunkers();
        assert_eq!(bunkers.len(), 3);
        assert!(bunkers.iter().all(|b| b.initial_fuel == 50));
        assert_eq!(config.formulation.refill_domain, VolumeDomain::Continuous);
    }

    #[test]
    fn test_invalid_config() {
        assert!(PlannerConfig::new(0, 100, 30).validate().is_err());
        assert!(PlannerConfig::new(1, 0, 30).validate().is_err());
        assert!(PlannerConfig::new(1, 100, 0).validate().is_err());
        assert!(PlannerConfig::new(1, 100, 30)
            .with_initial_fuel(120)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "bunker_count": 2,
            "capacity": 100,
            "full_refill_duration": 30,
            "formulation": { "big_m": { "Fixed": 5000 }, "tie_break": "FewestRefills" }
        }"#;

        let config = PlannerConfig::from_json_str(json).unwrap();
        assert_eq!(config.bunker_count, 2);
        assert_eq!(config.initial_fuel, None);
        assert_eq!(config.formulation.big_m, BigM::Fixed(5000));
        assert_eq!(config.formulation.tie_break, TieBreak::FewestRefills);
        // 未指定的欄位使用預設值
        assert_eq!(config.formulation.refill_domain, VolumeDomain::Integer);
        assert!(config.formulation.cap_total_served);
    }

    #[test]
    fn test_config_from_json_rejects_invalid() {
        let json = r#"{ "bunker_count": 0, "capacity": 100, "full_refill_duration": 30 }"#;
        assert!(matches!(
            PlannerConfig::from_json_str(json),
            Err(BunkerError::InvalidInput(_))
        ));
    }
}
