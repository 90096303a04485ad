// ── Production: machines, cost centers, orders ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: String,
    pub code: Option<String>,
    pub description: String,
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: String,
    pub code: Option<String>,
    pub description: String,
}

/// Production order lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Open,
    InProgress,
    Closed,
    Unknown,
}

impl OrderStatus {
    /// Map the wire string, degrading to `Unknown` on anything new.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "open" => Self::Open,
            "in_progress" => Self::InProgress,
            "closed" => Self::Closed,
            _ => Self::Unknown,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Open => "open",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub id: String,
    pub number: Option<String>,
    pub description: String,
    pub status: OrderStatus,
    pub machine_id: Option<String>,
    pub cost_center_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
