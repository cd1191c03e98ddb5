use serde::Serialize;

use crate::category::Category;

/// Where a panel is in its Idle → Loading → Success/Failed cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelPhase {
    Loading,
    Success,
    Failed,
    /// A completion arrived for a request that is no longer current
    Discarded,
}

#[derive(Clone, Debug, Serialize)]
pub struct PanelTransition {
    pub category: Category,
    pub stock_id: u32,
    pub phase: PanelPhase,
    pub generation: u64,
    pub from_cache: bool,
}

// Global Event Enum
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StockSelected { stock_id: u32, ticker: String },
    CategorySelected { category: Category },
    Panel(PanelTransition),
}
