// Stock movement endpoints (entries and exits).
//
// The list endpoint embeds each movement's lines as a raw resource
// array under the `lines` attribute; materialization re-attaches them
// as a relation. Writes go through direction-specific verbs so the
// backend can validate stock and pre-order state per direction.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const STOCK_MOVEMENTS_PATH: &str = "tenancies/:tenancy_id/stock-movements";

/// Attribute carrying the embedded line collection on list responses.
pub const MOVEMENT_LINES_FIELD: &str = "lines";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementLineDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_id: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
}

impl FromResource for MovementLineDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            item_id: resource
                .value_at("item.id")
                .and_then(|v| v.as_str().map(str::to_owned))
                .or_else(|| resource.attr_str("item_id")),
            quantity: resource.attr_f64("quantity"),
            unit_price: resource.attr_f64("unit_price"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockMovementDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `entry` | `exit`
    pub direction: Option<String>,
    /// Fiscal document / requisition number.
    pub document: Option<String>,
    pub moved_at: Option<String>,
    pub cost_center_id: Option<String>,
    /// Entries: the supplying provider.
    pub provider_id: Option<String>,
    /// Exits: the withdrawing collaborator.
    pub collaborator_id: Option<String>,
    pub lines: Vec<MovementLineDto>,
}

impl FromResource for StockMovementDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            direction: resource.attr_str("direction"),
            document: resource.attr_str("document"),
            moved_at: resource.attr_str("moved_at"),
            cost_center_id: resource
                .value_at("costCenter.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            provider_id: resource
                .value_at("provider.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            collaborator_id: resource
                .value_at("collaborator.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            lines: MovementLineDto::from_many(resource.related_many(MOVEMENT_LINES_FIELD)),
        }
    }
}

impl ApiClient {
    /// List movements with their lines materialized as a relation.
    pub async fn list_stock_movements(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list_embedded(STOCK_MOVEMENTS_PATH, params, MOVEMENT_LINES_FIELD)
            .await
    }

    /// `POST stock-movements/register-entry`
    pub async fn register_stock_entry(&self, dto: &StockMovementDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                STOCK_MOVEMENTS_PATH,
                "register-entry",
                dto_body("stock_movement_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    /// `POST stock-movements/register-exit`
    pub async fn register_stock_exit(&self, dto: &StockMovementDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                STOCK_MOVEMENTS_PATH,
                "register-exit",
                dto_body("stock_movement_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::resource::materialize_many_embedded;
    use crate::wire::Document;

    fn movement() -> Resource {
        let doc: Document = serde_json::from_value(json!({
            "data": [{
                "type": "stock-movements",
                "id": "5",
                "attributes": {
                    "direction": "exit",
                    "document": "REQ-88",
                    "lines": [
                        {
                            "type": "movement-lines",
                            "id": "51",
                            "attributes": { "quantity": 2, "unit_price": "10.50" },
                            "relationships": {
                                "item": { "data": { "type": "items", "id": "1" } },
                            },
                        },
                    ],
                },
                "relationships": {
                    "costCenter": { "data": { "type": "cost-centers", "id": "3" } },
                },
            }],
        }))
        .unwrap();
        materialize_many_embedded(&doc, MOVEMENT_LINES_FIELD)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn dto_captures_lines_and_related_ids() {
        let dto = StockMovementDto::from_resource(&movement());
        assert_eq!(dto.direction.as_deref(), Some("exit"));
        assert_eq!(dto.cost_center_id.as_deref(), Some("3"));
        assert_eq!(dto.lines.len(), 1);
        assert_eq!(dto.lines[0].item_id.as_deref(), Some("1"));
        assert_eq!(dto.lines[0].quantity, Some(2.0));
        assert_eq!(dto.lines[0].unit_price, Some(10.5));
    }

    #[test]
    fn nested_dto_clone_is_independent() {
        let original = StockMovementDto::from_resource(&movement());
        let mut copy = original.clone();

        copy.lines[0].quantity = Some(99.0);
        copy.document = Some("OTHER".into());

        assert_eq!(original.lines[0].quantity, Some(2.0));
        assert_eq!(original.document.as_deref(), Some("REQ-88"));
    }
}
