// Collaborator endpoints.
//
// Collaborators are invited rather than created: the backend sends the
// invite email and activates the account on acceptance, so every write
// goes through a named verb.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const COLLABORATORS_PATH: &str = "tenancies/:tenancy_id/collaborators";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Badge / registration number.
    pub registration: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl FromResource for CollaboratorDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            name: resource.attr_str("name"),
            email: resource.attr_str("email"),
            registration: resource.attr_str("registration"),
            role: resource.attr_str("role"),
            active: resource.attr_bool("active"),
        }
    }
}

impl ApiClient {
    pub async fn list_collaborators(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(COLLABORATORS_PATH, params).await
    }

    /// `POST collaborators/invite-or-update` -- invites on create,
    /// plain update when the id is present.
    pub async fn invite_or_update_collaborator(
        &self,
        dto: &CollaboratorDto,
    ) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                COLLABORATORS_PATH,
                "invite-or-update",
                dto_body("collaborator_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    pub async fn resend_collaborator_invite(&self, id: &str) -> Result<(), Error> {
        self.put_action(COLLABORATORS_PATH, "resend-invite", json!({ "id": id }))
            .await?;
        Ok(())
    }

    /// Removal requires a justification recorded in the audit trail.
    pub async fn remove_collaborator_with_justification(
        &self,
        id: &str,
        justification: &str,
    ) -> Result<(), Error> {
        self.put_action(
            COLLABORATORS_PATH,
            "delete-with-justification",
            json!({ "id": id, "justification": justification }),
        )
        .await?;
        Ok(())
    }
}
