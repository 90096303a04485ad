// ── Catalog: tools and their classification ──

use serde::{Deserialize, Serialize};

/// A tool tracked in stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub code: Option<String>,
    pub description: String,
    /// Stock unit, e.g. "un", "cx", "kg".
    pub unit: Option<String>,
    pub stock_quantity: f64,
    pub minimum_stock: f64,
    pub pre_ordered: bool,
    pub group: Option<ItemGroup>,
    pub manufacturer: Option<Manufacturer>,
}

impl Tool {
    /// Below-minimum check feeding the dashboard's restock list.
    pub fn is_below_minimum(&self) -> bool {
        self.minimum_stock > 0.0 && self.stock_quantity < self.minimum_stock
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
}

/// A supplier of tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
