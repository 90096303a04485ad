// Provider (supplier) endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::entities::{FromResource, dto_body};
use crate::error::Error;
use crate::query::ParamMap;
use crate::resource::{Resource, materialize_one};

pub const PROVIDERS_PATH: &str = "tenancies/:tenancy_id/providers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    /// Tax document (CNPJ/CPF), digits only.
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FromResource for ProviderDto {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().map(str::to_owned),
            name: resource.attr_str("name"),
            document: resource.attr_str("document"),
            email: resource.attr_str("email"),
            phone: resource.attr_str("phone"),
        }
    }
}

impl ApiClient {
    pub async fn list_providers(&self, params: ParamMap) -> Result<Vec<Resource>, Error> {
        self.list(PROVIDERS_PATH, params).await
    }

    pub async fn save_provider(&self, dto: &ProviderDto) -> Result<Resource, Error> {
        let doc = self
            .post_action(
                PROVIDERS_PATH,
                "create-or-update",
                dto_body("provider_dto", dto),
            )
            .await?;
        materialize_one(&doc)
    }

    pub async fn remove_providers(&self, ids: &[String]) -> Result<(), Error> {
        self.remove_ids(PROVIDERS_PATH, ids).await
    }
}
