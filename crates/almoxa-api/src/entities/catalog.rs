// Catalog endpoints: item groups and manufacturers.
//
// Small lookup entities used to classify items. Both are plain
// create-or-update collections with no extra verbs.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const ITEM_GROUPS_PATH: &str = "tenancies/:tenancy_id/item-groups";
pub const MANUFACTURERS_PATH: &str = "tenancies/:tenancy_id/manufacturers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemGroupDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: Option<String>,
}

impl FromResource for ItemGroupDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            description: resource.attr_str("description"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
}

impl FromResource for ManufacturerDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            name: resource.attr_str("name"),
        }
    }
}

impl ApiClient {
    pub async fn list_item_groups(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(ITEM_GROUPS_PATH, params).await
    }

    pub async fn save_item_group(&self, dto: &ItemGroupDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                ITEM_GROUPS_PATH,
                "create-or-update",
                dto_body("item_group_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    pub async fn list_manufacturers(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(MANUFACTURERS_PATH, params).await
    }

    pub async fn save_manufacturer(&self, dto: &ManufacturerDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                MANUFACTURERS_PATH,
                "create-or-update",
                dto_body("manufacturer_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }
}
