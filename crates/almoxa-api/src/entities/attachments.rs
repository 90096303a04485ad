// Attachment endpoints.
//
// Attachments hang off an owning entity (item manuals, provider
// contracts, order drawings) via a polymorphic owner pair. The binary
// upload itself goes to object storage; this layer only tracks the
// metadata row.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const ATTACHMENTS_PATH: &str = "tenancies/:tenancy_id/attachments";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    /// Owning entity kind, e.g. `items`.
    pub owner_type: Option<String>,
    pub owner_id: Option<String>,
    /// Download URL assigned by the server.
    pub url: Option<String>,
}

impl FromResource for AttachmentDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            file_name: resource.attr_str("file_name"),
            content_type: resource.attr_str("content_type"),
            owner_type: resource.attr_str("owner_type"),
            owner_id: resource.attr_str("owner_id"),
            url: resource.attr_str("url"),
        }
    }
}

impl ApiClient {
    /// List attachments belonging to one owning entity.
    pub async fn list_attachments(
        &self,
        owner_type: &str,
        owner_id: &str,
    ) -> Result<Vec<Resource>, Error> {
        let params = match json!({
            "filter": { "owner_type": owner_type, "owner_id": owner_id },
        }) {
            serde_json::Value::Object(map) => map,
            _ => ParamMap::new(),
        };
        self.list(ATTACHMENTS_PATH, params).await
    }

    pub async fn save_attachment(&self, dto: &AttachmentDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                ATTACHMENTS_PATH,
                "create-or-update",
                dto_body("attachment_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    pub async fn remove_attachments(&self, ids: &[String]) -> Result<(), Error> {
        self.remove_ids(ATTACHMENTS_PATH, ids).await
    }
}
