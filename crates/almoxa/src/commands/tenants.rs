//! Tenancy listing and selection.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use almoxa_api::ParamMap;
use almoxa_core::Tenancy;

use crate::cli::{GlobalOpts, TenantsCmd};
use crate::commands::{connect, params};
use crate::error::CliError;
use crate::output::{cell, render};

#[derive(Tabled, Serialize)]
struct TenancyRow {
    id: String,
    name: String,
    parent: String,
    current: String,
}

pub async fn handle(cmd: TenantsCmd, global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    match cmd {
        TenantsCmd::List => {
            let resources = app
                .client
                .list_tenancies(params(json!({ "include": "parent" })))
                .await?;
            let current = app.client.context().tenant_id.clone();

            let rows: Vec<TenancyRow> = resources
                .iter()
                .map(Tenancy::from)
                .map(|t| TenancyRow {
                    current: if Some(&t.id) == current.as_ref() {
                        "*".into()
                    } else {
                        String::new()
                    },
                    parent: cell(&t.parent_id),
                    id: t.id,
                    name: t.name,
                })
                .collect();
            render(app.output, &rows)
        }

        TenantsCmd::Use { tenant_id } => {
            let resources = app.client.list_tenancies(ParamMap::new()).await?;
            let Some(found) = resources.iter().find(|r| r.id() == Some(tenant_id.as_str()))
            else {
                return Err(CliError::NotFound {
                    entity: "tenancy".into(),
                    identifier: tenant_id,
                    list_command: "tenants list".into(),
                });
            };
            let name = found.attr_str("name").unwrap_or_default();
            app.files.store_tenant(&tenant_id, &name)?;
            println!("Now acting in tenancy {tenant_id} -- {name}");
            Ok(())
        }
    }
}
