// JSON:API wire types.
//
// Responses carry `{ data, included }` where `data` is a single
// resource object, an array, or null, and `included` sideloads the
// full representations of related resources. Fields use
// `#[serde(default)]` liberally because the backend omits empty maps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON:API response document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: PrimaryData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// The `data` member: one resource, many, or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<ResourceObject>),
    One(Box<ResourceObject>),
    Null,
}

impl Default for PrimaryData {
    fn default() -> Self {
        Self::Null
    }
}

/// A full resource object: `{ type, id, attributes, relationships }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    /// Absent on create payloads; assigned by the server otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub relationships: HashMap<String, Relationship>,
}

/// A relationship member. Only the resource-linkage form is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

/// Resource linkage: one identifier or many.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
}

/// A bare resource identifier: `{ type, id }`, no attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_plural_document_with_included() {
        let doc: Document = serde_json::from_value(json!({
            "data": [
                { "type": "items", "id": "1", "attributes": { "description": "Drill" } },
                { "type": "items", "id": "2" },
            ],
            "included": [
                { "type": "item-groups", "id": "9", "attributes": { "description": "Power" } },
            ],
        }))
        .unwrap();

        match doc.data {
            PrimaryData::Many(ref rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].id.as_deref(), Some("1"));
            }
            ref other => panic!("expected Many, got {other:?}"),
        }
        assert_eq!(doc.included.len(), 1);
        assert_eq!(doc.included[0].kind, "item-groups");
    }

    #[test]
    fn parses_singular_document_with_relationships() {
        let doc: Document = serde_json::from_value(json!({
            "data": {
                "type": "items",
                "id": "1",
                "relationships": {
                    "itemGroup": { "data": { "type": "item-groups", "id": "9" } },
                },
            },
        }))
        .unwrap();

        let PrimaryData::One(obj) = doc.data else {
            panic!("expected One");
        };
        let rel = &obj.relationships["itemGroup"];
        match rel.data {
            Some(RelationshipData::One(ref ident)) => assert_eq!(ident.id, "9"),
            ref other => panic!("expected One identifier, got {other:?}"),
        }
    }

    #[test]
    fn null_and_missing_data_both_parse() {
        let doc: Document = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(matches!(doc.data, PrimaryData::Null));

        let doc: Document = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(doc.data, PrimaryData::Null));
    }
}
