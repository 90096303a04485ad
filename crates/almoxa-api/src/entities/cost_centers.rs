// Cost center endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const COST_CENTERS_PATH: &str = "tenancies/:tenancy_id/cost-centers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostCenterDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}

impl FromResource for CostCenterDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            code: resource.attr_str("code"),
            description: resource.attr_str("description"),
        }
    }
}

impl ApiClient {
    pub async fn list_cost_centers(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(COST_CENTERS_PATH, params).await
    }

    pub async fn save_cost_center(&self, dto: &CostCenterDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                COST_CENTERS_PATH,
                "create-or-update",
                dto_body("cost_center_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    pub async fn remove_cost_centers(&self, ids: &[String]) -> Result<(), Error> {
        self.remove_ids(COST_CENTERS_PATH, ids).await
    }
}
