// ── Stock movements ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether stock went in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    Entry,
    Exit,
}

impl MovementDirection {
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "entry" => Some(Self::Entry),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

/// One item line inside a movement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementLine {
    pub id: String,
    pub item_id: Option<String>,
    pub quantity: f64,
    pub unit_price: Option<f64>,
}

impl MovementLine {
    /// Line value when priced; unpriced lines contribute nothing.
    pub fn total_value(&self) -> f64 {
        self.unit_price.map_or(0.0, |price| price * self.quantity)
    }
}

/// A stock entry or exit with its lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: String,
    pub direction: Option<MovementDirection>,
    pub document: Option<String>,
    pub moved_at: Option<DateTime<Utc>>,
    pub cost_center_id: Option<String>,
    pub provider_id: Option<String>,
    pub collaborator_id: Option<String>,
    pub lines: Vec<MovementLine>,
}

impl StockMovement {
    pub fn total_value(&self) -> f64 {
        self.lines.iter().map(MovementLine::total_value).sum()
    }

    pub fn total_quantity(&self) -> f64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
