// Production order endpoints.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const PRODUCTION_ORDERS_PATH: &str = "tenancies/:tenancy_id/production-orders";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrderDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub number: Option<String>,
    pub description: Option<String>,
    /// `open` | `in_progress` | `closed`
    pub status: Option<String>,
    pub machine_id: Option<String>,
    pub cost_center_id: Option<String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

impl FromResource for ProductionOrderDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            number: resource.attr_str("number"),
            description: resource.attr_str("description"),
            status: resource.attr_str("status"),
            machine_id: resource
                .value_at("machine.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            cost_center_id: resource
                .value_at("costCenter.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            started_at: resource.attr_str("started_at"),
            finished_at: resource.attr_str("finished_at"),
        }
    }
}

impl ApiClient {
    pub async fn list_production_orders(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(PRODUCTION_ORDERS_PATH, params).await
    }

    pub async fn find_production_order(&self, id: &str) -> Result<Resource, Error> {
        self.find(PRODUCTION_ORDERS_PATH, id).await
    }

    pub async fn save_production_order(
        &self,
        dto: &ProductionOrderDto,
    ) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                PRODUCTION_ORDERS_PATH,
                "create-or-update",
                dto_body("production_order_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    /// Close an order; the backend stamps `finished_at`.
    pub async fn close_production_order(&self, id: &str) -> Result<(), Error> {
        self.put_action(PRODUCTION_ORDERS_PATH, "close", json!({ "id": id }))
            .await?;
        Ok(())
    }

    pub async fn remove_production_orders(&self, ids: &[String]) -> Result<(), Error> {
        self.remove_ids(PRODUCTION_ORDERS_PATH, ids).await
    }
}
