// Dashboard aggregation.
//
// Pure rollups over already-fetched domain data; the backend has no
// dedicated report endpoint, the original dashboard computed these
// client-side from the same listings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{MovementDirection, ProductionOrder, StockMovement, Tool};

/// Per-cost-center exit rollup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostCenterUsage {
    pub cost_center_id: String,
    pub exit_count: usize,
    pub total_value: f64,
}

/// Everything the dashboard shows in one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardReport {
    pub entry_count: usize,
    pub exit_count: usize,
    pub entry_value: f64,
    pub exit_value: f64,
    /// Exits grouped by cost center, highest value first.
    pub cost_centers: Vec<CostCenterUsage>,
    /// Tools whose stock fell below their minimum.
    pub below_minimum: Vec<Tool>,
    pub pre_ordered_count: usize,
    pub open_order_count: usize,
}

/// Build the dashboard from fetched listings. Movements without a
/// direction (unknown wire values) are ignored.
pub fn build_dashboard(
    movements: &[StockMovement],
    tools: &[Tool],
    orders: &[ProductionOrder],
) -> DashboardReport {
    let mut report = DashboardReport::default();
    let mut by_cost_center: BTreeMap<String, CostCenterUsage> = BTreeMap::new();

    for movement in movements {
        match movement.direction {
            Some(MovementDirection::Entry) => {
                report.entry_count += 1;
                report.entry_value += movement.total_value();
            }
            Some(MovementDirection::Exit) => {
                report.exit_count += 1;
                report.exit_value += movement.total_value();

                if let Some(ref cc) = movement.cost_center_id {
                    let usage = by_cost_center.entry(cc.clone()).or_insert_with(|| {
                        CostCenterUsage {
                            cost_center_id: cc.clone(),
                            ..CostCenterUsage::default()
                        }
                    });
                    usage.exit_count += 1;
                    usage.total_value += movement.total_value();
                }
            }
            None => {}
        }
    }

    report.cost_centers = by_cost_center.into_values().collect();
    report
        .cost_centers
        .sort_by(|a, b| b.total_value.total_cmp(&a.total_value));

    report.below_minimum = tools
        .iter()
        .filter(|t| t.is_below_minimum())
        .cloned()
        .collect();
    report.pre_ordered_count = tools.iter().filter(|t| t.pre_ordered).count();
    report.open_order_count = orders.iter().filter(|o| o.status.is_open()).count();

    report
}
