// Machine endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const MACHINES_PATH: &str = "tenancies/:tenancy_id/machines";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    /// Shop-floor sector the machine lives in.
    pub sector: Option<String>,
}

impl FromResource for MachineDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            code: resource.attr_str("code"),
            description: resource.attr_str("description"),
            sector: resource.attr_str("sector"),
        }
    }
}

impl ApiClient {
    pub async fn list_machines(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(MACHINES_PATH, params).await
    }

    pub async fn save_machine(&self, dto: &MachineDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(MACHINES_PATH, "create-or-update", dto_body("machine_dto", dto))
            .await?;
        materialize_one(&doc)
    }

    pub async fn remove_machines(&self, ids: &[String]) -> Result<(), Error> {
        self.remove_ids(MACHINES_PATH, ids).await
    }
}
