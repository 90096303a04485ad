//! Collaborator management.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use almoxa_api::entities::collaborators::CollaboratorDto;
use almoxa_core::Collaborator;

use crate::cli::{CollaboratorInviteArgs, CollaboratorsCmd, GlobalOpts};
use crate::commands::{connect, params};
use crate::error::CliError;
use crate::output::{cell, render};

#[derive(Tabled, Serialize)]
struct CollaboratorRow {
    id: String,
    name: String,
    email: String,
    registration: String,
    role: String,
    active: bool,
}

pub async fn handle(cmd: CollaboratorsCmd, global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    match cmd {
        CollaboratorsCmd::List => {
            let resources = app
                .client
                .list_collaborators(params(json!({ "sort": "name" })))
                .await?;
            let rows: Vec<CollaboratorRow> = resources
                .iter()
                .map(Collaborator::from)
                .map(|c| CollaboratorRow {
                    id: c.id,
                    name: c.name,
                    email: cell(&c.email),
                    registration: cell(&c.registration),
                    role: cell(&c.role),
                    active: c.active,
                })
                .collect();
            render(app.output, &rows)
        }

        CollaboratorsCmd::Invite(args) => {
            let updating = args.id.is_some();
            let dto = dto_from_args(args);
            let saved = app.client.invite_or_update_collaborator(&dto).await?;
            if updating {
                println!("Updated collaborator {}", saved.id().unwrap_or("?"));
            } else {
                println!(
                    "Invited {} -- an activation email is on its way",
                    saved.attr_str("email").unwrap_or_default()
                );
            }
            Ok(())
        }

        CollaboratorsCmd::ResendInvite { id } => {
            app.client.resend_collaborator_invite(&id).await?;
            println!("Invite resent to collaborator {id}");
            Ok(())
        }

        CollaboratorsCmd::Remove { id, justification } => {
            app.client
                .remove_collaborator_with_justification(&id, &justification)
                .await?;
            println!("Removed collaborator {id}");
            Ok(())
        }
    }
}

fn dto_from_args(args: CollaboratorInviteArgs) -> CollaboratorDto {
    CollaboratorDto {
        id: args.id,
        name: Some(args.name),
        email: Some(args.email),
        registration: args.registration,
        role: args.role,
        active: None,
    }
}
