// Per-entity endpoints and DTOs.
//
// Each module declares its tenant-templated collection path, the DTO
// the backend accepts for writes, and the entity's named actions as
// inherent methods on `ApiClient`. Write bodies follow the backend's
// `{ "<entity>_dto": ... }` convention.

pub mod attachments;
pub mod auth;
pub mod catalog;
pub mod collaborators;
pub mod cost_centers;
pub mod items;
pub mod machines;
pub mod movements;
pub mod orders;
pub mod providers;
pub mod tenancies;
pub mod users;

use serde::Serialize;
use serde_json::{Value, json};

use crate::resource::Resource;

/// Snapshot conversion from a materialized resource into a write DTO.
///
/// Implementations tolerate partial resources: missing attributes
/// default, so a stub or foreign resource converts without erroring.
pub trait FromResource: Sized + Default {
    fn from_resource(resource: &Resource) -> Self;

    /// Map a batch of resources to DTOs, dropping entries the server
    /// never assigned an id (unsaved placeholders in UI state).
    fn from_many(resources: &[Resource]) -> Vec<Self> {
        resources
            .iter()
            .filter(|r| r.id().is_some())
            .map(Self::from_resource)
            .collect()
    }
}

/// Wrap a DTO in the backend's `{ "<entity>_dto": ... }` envelope.
pub(crate) fn dto_body<T: Serialize>(key: &str, dto: &T) -> Value {
    json!({ key: dto })
}
