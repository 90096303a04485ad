//! Stock dashboard.

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use almoxa_api::ParamMap;
use almoxa_core::{ProductionOrder, StockMovement, Tool, build_dashboard};

use crate::cli::GlobalOpts;
use crate::commands::{connect, params};
use crate::error::CliError;
use crate::output::{cell, render, render_value};

#[derive(Tabled, Serialize)]
struct CostCenterRow {
    cost_center: String,
    exits: usize,
    total_value: String,
}

#[derive(Tabled, Serialize)]
struct LowStockRow {
    id: String,
    code: String,
    description: String,
    stock: f64,
    minimum: f64,
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    let movements: Vec<StockMovement> = app
        .client
        .list_stock_movements(ParamMap::new())
        .await?
        .iter()
        .map(StockMovement::from)
        .collect();
    let tools: Vec<Tool> = app
        .client
        .list_items(params(json!({ "include": "itemGroup" })))
        .await?
        .iter()
        .map(Tool::from)
        .collect();
    let orders: Vec<ProductionOrder> = app
        .client
        .list_production_orders(ParamMap::new())
        .await?
        .iter()
        .map(ProductionOrder::from)
        .collect();

    let report = build_dashboard(&movements, &tools, &orders);

    if render_value(app.output, &report)? {
        return Ok(());
    }

    println!("{}", "Stock dashboard".bold());
    println!(
        "  entries: {} ({:.2})   exits: {} ({:.2})",
        report.entry_count, report.entry_value, report.exit_count, report.exit_value
    );
    println!(
        "  open orders: {}   pre-ordered tools: {}",
        report.open_order_count, report.pre_ordered_count
    );

    if !report.cost_centers.is_empty() {
        println!();
        println!("{}", "Exits by cost center".bold());
        let rows: Vec<CostCenterRow> = report
            .cost_centers
            .iter()
            .map(|usage| CostCenterRow {
                cost_center: usage.cost_center_id.clone(),
                exits: usage.exit_count,
                total_value: format!("{:.2}", usage.total_value),
            })
            .collect();
        render(app.output, &rows)?;
    }

    if !report.below_minimum.is_empty() {
        println!();
        println!("{}", "Below minimum stock".red().bold());
        let rows: Vec<LowStockRow> = report
            .below_minimum
            .iter()
            .map(|tool| LowStockRow {
                id: tool.id.clone(),
                code: cell(&tool.code),
                description: tool.description.clone(),
                stock: tool.stock_quantity,
                minimum: tool.minimum_stock,
            })
            .collect();
        render(app.output, &rows)?;
    }

    Ok(())
}
