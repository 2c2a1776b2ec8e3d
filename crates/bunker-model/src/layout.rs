//! 決策變數配置
//!
//! 每艘船、每筆請求三個變數，依 (船, 請求) 順序連續排列：
//! `serve[b,i]`、`refill[b,i]`、`refill_volume[b,i]`。

use serde::{Deserialize, Serialize};

use crate::program::VarId;

/// 變數種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    Serve,
    Refill,
    RefillVolume,
}

impl VarKind {
    const COUNT: usize = 3;

    fn offset(self) -> usize {
        match self {
            VarKind::Serve => 0,
            VarKind::Refill => 1,
            VarKind::RefillVolume => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VarKind::Serve => "serve",
            VarKind::Refill => "refill",
            VarKind::RefillVolume => "refill_volume",
        }
    }
}

/// (船, 請求) → 變數識別碼的對應
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableLayout {
    bunker_count: usize,
    request_count: usize,
}

impl VariableLayout {
    pub fn new(bunker_count: usize, request_count: usize) -> Self {
        Self {
            bunker_count,
            request_count,
        }
    }

    pub fn bunker_count(&self) -> usize {
        self.bunker_count
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    /// 變數總數
    pub fn len(&self) -> usize {
        self.bunker_count * self.request_count * VarKind::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn id(&self, kind: VarKind, bunker: usize, request: usize) -> VarId {
        debug_assert!(bunker < self.bunker_count && request < self.request_count);
        VarId((bunker * self.request_count + request) * VarKind::COUNT + kind.offset())
    }

    pub fn serve(&self, bunker: usize, request: usize) -> VarId {
        self.id(VarKind::Serve, bunker, request)
    }

    pub fn refill(&self, bunker: usize, request: usize) -> VarId {
        self.id(VarKind::Refill, bunker, request)
    }

    pub fn refill_volume(&self, bunker: usize, request: usize) -> VarId {
        self.id(VarKind::RefillVolume, bunker, request)
    }

    /// 變數名稱，例如 `serve[b=0,i=3]`
    pub fn name(kind: VarKind, bunker: usize, request: usize) -> String {
        format!("{}[b={},i={}]", kind.label(), bunker, request)
    }
}
