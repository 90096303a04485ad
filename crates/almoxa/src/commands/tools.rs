//! Tool management.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use almoxa_api::entities::items::ItemDto;
use almoxa_api::Sharing;
use almoxa_core::Tool;

use crate::cli::{GlobalOpts, ToolAddArgs, ToolsCmd};
use crate::commands::{confirm, connect, params};
use crate::error::CliError;
use crate::output::{cell, render};

#[derive(Tabled, Serialize)]
struct ToolRow {
    id: String,
    code: String,
    description: String,
    group: String,
    stock: String,
    minimum: String,
    flags: String,
}

pub async fn handle(cmd: ToolsCmd, global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    match cmd {
        ToolsCmd::List { search } => {
            let mut query = json!({ "include": "itemGroup,manufacturer" });
            if let Some(ref term) = search {
                query["filter"] = json!({ "description": term });
            }
            let resources = app.client.list_items(params(query)).await?;
            let ctx = app.client.context();

            let rows: Vec<ToolRow> = resources
                .iter()
                .map(|resource| {
                    let tool = Tool::from(resource);
                    let mut flags = Vec::new();
                    if tool.pre_ordered {
                        flags.push("pre-ordered");
                    }
                    match resource.sharing(&ctx) {
                        Sharing::Inherited => flags.push("inherited"),
                        Sharing::Shared => flags.push("shared"),
                        Sharing::Owned => {}
                    }
                    ToolRow {
                        id: tool.id,
                        code: cell(&tool.code),
                        description: tool.description,
                        group: tool
                            .group
                            .map(|g| g.description)
                            .unwrap_or_else(|| "-".into()),
                        stock: format!(
                            "{} {}",
                            tool.stock_quantity,
                            tool.unit.as_deref().unwrap_or("")
                        )
                        .trim_end()
                        .to_owned(),
                        minimum: tool.minimum_stock.to_string(),
                        flags: flags.join(", "),
                    }
                })
                .collect();
            render(app.output, &rows)
        }

        ToolsCmd::Add(args) => {
            let dto = dto_from_args(args);
            let saved = app.client.save_item(&dto).await?;
            println!(
                "Saved tool {} -- {}",
                saved.id().unwrap_or("?"),
                saved.attr_str("description").unwrap_or_default()
            );
            Ok(())
        }

        ToolsCmd::PreOrder { id, undo } => {
            if undo {
                app.client.dismark_item_pre_ordered(&id).await?;
                println!("Cleared pre-order flag on {id}");
            } else {
                app.client.mark_item_pre_ordered(&id).await?;
                println!("Marked {id} as pre-ordered");
            }
            Ok(())
        }

        ToolsCmd::Remove { ids } => {
            if ids.is_empty() {
                return Err(CliError::Validation {
                    field: "ids".into(),
                    reason: "pass at least one tool id".into(),
                });
            }
            confirm(&format!("Delete {} tool(s)?", ids.len()), global.yes)?;
            app.client.remove_items(&ids).await?;
            println!("Removed {} tool(s)", ids.len());
            Ok(())
        }
    }
}

fn dto_from_args(args: ToolAddArgs) -> ItemDto {
    ItemDto {
        id: args.id,
        code: args.code,
        description: Some(args.description),
        unit: args.unit,
        minimum_stock: args.minimum_stock,
        item_group_id: args.group_id,
        manufacturer_id: args.manufacturer_id,
        ..ItemDto::default()
    }
}
