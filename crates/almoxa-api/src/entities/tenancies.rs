// Tenancy endpoints.
//
// Listing returns every tenancy the account can act in, with the
// parent chain sideloaded. Switching tenants is client-side: swap the
// request context and persist the selection.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::FromResource;
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::Resource;

pub const TENANCIES_PATH: &str = "tenancies";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenancyDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub parent_id: Option<String>,
}

impl FromResource for TenancyDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            name: resource.attr_str("name"),
            parent_id: resource
                .value_at("parent.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
        }
    }
}

impl ApiClient {
    pub async fn list_tenancies(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(TENANCIES_PATH, params).await
    }
}
