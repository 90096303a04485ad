// Item (tool) endpoints.
//
// Items are the tools tracked in stock. Listing usually sideloads the
// item group and manufacturer so tables can show catalog columns
// without extra requests.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const ITEMS_PATH: &str = "tenancies/:tenancy_id/items";

/// Write payload for create-or-update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub stock_quantity: Option<f64>,
    pub minimum_stock: Option<f64>,
    pub pre_ordered: Option<bool>,
    pub item_group_id: Option<String>,
    pub manufacturer_id: Option<String>,
}

impl FromResource for ItemDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            code: resource.attr_str("code"),
            description: resource.attr_str("description"),
            unit: resource.attr_str("unit"),
            stock_quantity: resource.attr_f64("stock_quantity"),
            minimum_stock: resource.attr_f64("minimum_stock"),
            pre_ordered: resource.attr_bool("pre_ordered"),
            item_group_id: resource
                .value_at("itemGroup.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            manufacturer_id: resource
                .value_at("manufacturer.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
        }
    }
}

impl ApiClient {
    pub async fn list_items(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(ITEMS_PATH, params).await
    }

    pub async fn find_item(&self, id: &str) -> Result<Resource, Error> {
        self.find(ITEMS_PATH, id).await
    }

    /// `POST items/create-or-update` -- id absent creates, present updates.
    pub async fn save_item(&self, dto: &ItemDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(ITEMS_PATH, "create-or-update", dto_body("item_dto", dto))
            .await?;
        materialize_one(&doc)
    }

    /// Flag an item as pre-ordered so exits warn about incoming stock.
    pub async fn mark_item_pre_ordered(&self, id: &str) -> Result<(), Error> {
        self.put_action(ITEMS_PATH, "mark-as-pre-ordered", json!({ "id": id }))
            .await?;
        Ok(())
    }

    pub async fn dismark_item_pre_ordered(&self, id: &str) -> Result<(), Error> {
        self.put_action(ITEMS_PATH, "dismark-as-pre-ordered", json!({ "id": id }))
            .await?;
        Ok(())
    }

    pub async fn remove_items(&self, ids: &[String]) -> Result<(), Error> {
        self.remove_ids(ITEMS_PATH, ids).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::resource::materialize_many;
    use crate::wire::Document;

    #[test]
    fn dto_snapshots_attributes_and_related_ids() {
        let doc: Document = serde_json::from_value(json!({
            "data": [{
                "type": "items",
                "id": "1",
                "attributes": {
                    "code": "FER-001",
                    "description": "Torque wrench",
                    "unit": "un",
                    "stock_quantity": "4.5",
                    "minimum_stock": 2,
                    "pre_ordered": false,
                },
                "relationships": {
                    "itemGroup": { "data": { "type": "item-groups", "id": "9" } },
                },
            }],
        }))
        .unwrap();
        let rows = materialize_many(&doc).unwrap();

        let dto = ItemDto::from_resource(&rows[0]);
        assert_eq!(dto.code.as_deref(), Some("FER-001"));
        assert_eq!(dto.stock_quantity, Some(4.5));
        assert_eq!(dto.minimum_stock, Some(2.0));
        assert_eq!(dto.item_group_id.as_deref(), Some("9"));
        assert_eq!(dto.manufacturer_id, None);
    }

    #[test]
    fn from_many_drops_unsaved_resources() {
        let saved = {
            let doc: Document = serde_json::from_value(json!({
                "data": [{ "type": "items", "id": "1" }],
            }))
            .unwrap();
            materialize_many(&doc).unwrap().remove(0)
        };
        let unsaved = Resource::new("items");

        let dtos = ItemDto::from_many(&[saved, unsaved]);
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn dto_clone_is_independent() {
        let mut dto = ItemDto {
            id: Some("1".into()),
            description: Some("Drill".into()),
            ..ItemDto::default()
        };
        let copy = dto.clone();
        dto.description = Some("Changed".into());
        assert_eq!(copy.description.as_deref(), Some("Drill"));
    }
}
