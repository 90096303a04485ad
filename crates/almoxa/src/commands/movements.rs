//! Stock movement registration and listing.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use almoxa_api::ParamMap;
use almoxa_api::entities::movements::{MovementLineDto, StockMovementDto};
use almoxa_core::{MovementDirection, StockMovement};

use crate::cli::{GlobalOpts, MovementArgs, MovementsCmd};
use crate::commands::{connect, params};
use crate::error::CliError;
use crate::output::{cell, render};

#[derive(Tabled, Serialize)]
struct MovementRow {
    id: String,
    date: String,
    direction: String,
    document: String,
    cost_center: String,
    lines: usize,
    total: String,
}

pub async fn handle(cmd: MovementsCmd, global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    match cmd {
        MovementsCmd::List { direction } => {
            let query = match direction.as_deref() {
                None => ParamMap::new(),
                Some(d @ ("entry" | "exit")) => params(json!({ "filter": { "direction": d } })),
                Some(other) => {
                    return Err(CliError::Validation {
                        field: "direction".into(),
                        reason: format!("expected 'entry' or 'exit', got '{other}'"),
                    });
                }
            };
            let resources = app.client.list_stock_movements(query).await?;

            let rows: Vec<MovementRow> = resources
                .iter()
                .map(StockMovement::from)
                .map(|m| MovementRow {
                    id: m.id.clone(),
                    date: m
                        .moved_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".into()),
                    direction: m
                        .direction
                        .map(|d| d.as_wire().to_owned())
                        .unwrap_or_else(|| "-".into()),
                    document: cell(&m.document),
                    cost_center: cell(&m.cost_center_id),
                    lines: m.lines.len(),
                    total: format!("{:.2}", m.total_value()),
                })
                .collect();
            render(app.output, &rows)
        }

        MovementsCmd::Entry(args) => {
            let dto = dto_from_args(args, MovementDirection::Entry)?;
            let saved = app.client.register_stock_entry(&dto).await?;
            println!("Registered entry {}", saved.id().unwrap_or("?"));
            Ok(())
        }

        MovementsCmd::Exit(args) => {
            let dto = dto_from_args(args, MovementDirection::Exit)?;
            let saved = app.client.register_stock_exit(&dto).await?;
            println!("Registered exit {}", saved.id().unwrap_or("?"));
            Ok(())
        }
    }
}

fn dto_from_args(
    args: MovementArgs,
    direction: MovementDirection,
) -> Result<StockMovementDto, CliError> {
    let lines = args
        .items
        .iter()
        .map(|spec| parse_line(spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StockMovementDto {
        direction: Some(direction.as_wire().to_owned()),
        document: args.document,
        cost_center_id: args.cost_center,
        provider_id: args.provider,
        collaborator_id: args.collaborator,
        lines,
        ..StockMovementDto::default()
    })
}

/// Parse an `item_id:quantity[:unit_price]` line spec.
fn parse_line(spec: &str) -> Result<MovementLineDto, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "item".into(),
        reason,
    };

    let parts: Vec<&str> = spec.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid(format!(
            "expected item_id:quantity[:unit_price], got '{spec}'"
        )));
    }

    let quantity: f64 = parts[1]
        .parse()
        .map_err(|_| invalid(format!("quantity '{}' is not a number", parts[1])))?;
    let unit_price = parts
        .get(2)
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| invalid(format!("unit price '{raw}' is not a number")))
        })
        .transpose()?;

    Ok(MovementLineDto {
        id: None,
        item_id: Some(parts[0].to_owned()),
        quantity: Some(quantity),
        unit_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_spec_with_and_without_price() {
        let line = parse_line("42:3").unwrap();
        assert_eq!(line.item_id.as_deref(), Some("42"));
        assert_eq!(line.quantity, Some(3.0));
        assert_eq!(line.unit_price, None);

        let line = parse_line("42:3.5:10.25").unwrap();
        assert_eq!(line.quantity, Some(3.5));
        assert_eq!(line.unit_price, Some(10.25));
    }

    #[test]
    fn malformed_line_specs_are_rejected() {
        assert!(parse_line("42").is_err());
        assert!(parse_line("42:abc").is_err());
        assert!(parse_line("42:1:x").is_err());
        assert!(parse_line("a:b:c:d").is_err());
    }
}
