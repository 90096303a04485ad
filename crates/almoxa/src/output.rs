//! Output rendering: table (default), json, yaml.

use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Render a row set in the requested format.
pub fn render<T>(format: OutputFormat, rows: &[T]) -> Result<(), CliError>
where
    T: Tabled + Serialize,
{
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no results)");
            } else {
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(rows).map_err(|e| CliError::Validation {
                field: "output".into(),
                reason: e.to_string(),
            })?;
            print!("{yaml}");
        }
    }
    Ok(())
}

/// Render a single serializable value (report output).
pub fn render_value<T>(format: OutputFormat, value: &T) -> Result<bool, CliError>
where
    T: Serialize,
{
    match format {
        // Table rendering is the caller's job; report says so by the
        // false return.
        OutputFormat::Table => Ok(false),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(value).map_err(|e| CliError::Validation {
                field: "output".into(),
                reason: e.to_string(),
            })?;
            print!("{yaml}");
            Ok(true)
        }
    }
}

/// Shorthand for optional cell values.
pub fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".into())
}
