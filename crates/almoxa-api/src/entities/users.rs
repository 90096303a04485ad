// User endpoints.
//
// Users are not tenant-scoped: the same account can belong to several
// tenancies. Only the current account is reachable from the client.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::resource::{Resource, materialize_one};

pub const USERS_PATH: &str = "users";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FromResource for UserDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            name: resource.attr_str("name"),
            email: resource.attr_str("email"),
        }
    }
}

impl ApiClient {
    /// Re-fetch the authenticated account (fresher than the cached
    /// login blob after a profile update).
    pub async fn current_user(&self) -> Result<Resource, Error> {
        self.find(USERS_PATH, "current").await
    }

    pub async fn update_profile(&self, dto: &UserDto) -> Result<Resource, Error> {
        let doc = self
            .put_action(USERS_PATH, "update-profile", dto_body("user_dto", dto))
            .await?;
        materialize_one(&doc)
    }
}
