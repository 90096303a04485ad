//! Production order management.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use almoxa_api::entities::orders::ProductionOrderDto;
use almoxa_core::ProductionOrder;

use crate::cli::{GlobalOpts, OrderAddArgs, OrdersCmd};
use crate::commands::{confirm, connect, params};
use crate::error::CliError;
use crate::output::{cell, render};

#[derive(Tabled, Serialize)]
struct OrderRow {
    id: String,
    number: String,
    description: String,
    status: String,
    machine: String,
    started: String,
}

pub async fn handle(cmd: OrdersCmd, global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    match cmd {
        OrdersCmd::List => {
            let resources = app
                .client
                .list_production_orders(params(json!({ "include": "machine,costCenter" })))
                .await?;
            let rows: Vec<OrderRow> = resources
                .iter()
                .map(ProductionOrder::from)
                .map(|o| OrderRow {
                    id: o.id,
                    number: cell(&o.number),
                    description: o.description,
                    status: o.status.to_string(),
                    machine: cell(&o.machine_id),
                    started: o
                        .started_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".into()),
                })
                .collect();
            render(app.output, &rows)
        }

        OrdersCmd::Add(args) => {
            let dto = ProductionOrderDto {
                id: args.id,
                number: args.number,
                description: Some(args.description),
                machine_id: args.machine_id,
                cost_center_id: args.cost_center_id,
                ..ProductionOrderDto::default()
            };
            let saved = app.client.save_production_order(&dto).await?;
            println!("Saved order {}", saved.id().unwrap_or("?"));
            Ok(())
        }

        OrdersCmd::Close { id } => {
            app.client.close_production_order(&id).await?;
            println!("Closed order {id}");
            Ok(())
        }

        OrdersCmd::Remove { ids } => {
            if ids.is_empty() {
                return Err(CliError::Validation {
                    field: "ids".into(),
                    reason: "pass at least one order id".into(),
                });
            }
            confirm(&format!("Delete {} order(s)?", ids.len()), global.yes)?;
            app.client.remove_production_orders(&ids).await?;
            println!("Removed {} order(s)", ids.len());
            Ok(())
        }
    }
}
