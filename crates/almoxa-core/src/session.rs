// Session state derived from the cached login payload.
//
// The login response is cached verbatim by the config crate; this
// module re-derives the current user, selected tenancy, and the
// parent-tenancy chain from its sideloads, and builds the request
// context the API client runs with. A missing or stale payload
// degrades to an anonymous context rather than erroring.

use almoxa_api::entities::auth::LoginResponse;
use almoxa_api::resource::{materialize_one, resolve_identifier};
use almoxa_api::wire::{Document, RelationshipData, ResourceIdentifier, ResourceObject};
use almoxa_api::RequestContext;
use secrecy::SecretString;

use crate::error::CoreError;
use crate::model::{Tenancy, User};

const TENANCIES_KIND: &str = "tenancies";

/// Everything the client needs from one login.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub token: SecretString,
    pub user: User,
    pub tenancy: Option<Tenancy>,
    /// Ancestor tenancy ids of the selected tenancy, nearest first.
    pub parent_chain: Vec<String>,
}

impl SessionState {
    /// Derive session state from a login response (fresh or cached).
    /// The user's own tenancy is selected initially.
    pub fn from_login(response: &LoginResponse) -> Result<Self, CoreError> {
        let user_resource =
            materialize_one(&response.document).map_err(|e| CoreError::SessionInvalid {
                reason: e.to_string(),
            })?;
        let tenancy = user_resource.related_one("tenancy").map(Tenancy::from);
        let parent_chain = tenancy
            .as_ref()
            .map(|t| parent_chain(&response.document, &t.id))
            .unwrap_or_default();

        Ok(Self {
            token: SecretString::from(response.token.clone()),
            user: User::from(&user_resource),
            tenancy,
            parent_chain,
        })
    }

    /// Parse the persisted session blob (a login response serialized
    /// verbatim), optionally re-selecting a different tenancy the user
    /// switched to.
    pub fn from_cached_blob(raw: &str, selected_tenant: Option<&str>) -> Result<Self, CoreError> {
        let response: LoginResponse =
            serde_json::from_str(raw).map_err(|e| CoreError::SessionInvalid {
                reason: e.to_string(),
            })?;
        let mut state = Self::from_login(&response)?;
        if let Some(tenant_id) = selected_tenant {
            if state.tenancy.as_ref().map(|t| t.id.as_str()) != Some(tenant_id) {
                state.select_tenancy(tenant_id, &response.document);
            }
        }
        Ok(state)
    }

    /// Switch the selected tenancy, re-resolving its parent chain from
    /// the cached document's sideloads. An id the sideloads don't know
    /// still selects (the backend is authoritative); its chain is empty.
    pub fn select_tenancy(&mut self, tenant_id: &str, document: &Document) {
        let ident = ResourceIdentifier {
            kind: TENANCIES_KIND.to_owned(),
            id: tenant_id.to_owned(),
        };
        let resource = resolve_identifier(&ident, &document.included);
        self.tenancy = Some(Tenancy::from(&resource));
        self.parent_chain = parent_chain(document, tenant_id);
    }

    /// The request context the API client should run with.
    pub fn request_context(&self) -> RequestContext {
        let mut ctx = RequestContext::authenticated(self.token.clone());
        if let Some(ref tenancy) = self.tenancy {
            ctx = ctx
                .with_tenant(tenancy.id.clone())
                .with_parent_tenants(self.parent_chain.clone());
        }
        ctx
    }
}

/// Walk the parent-tenancy chain for `tenant_id` through the cached
/// document's sideloads, nearest ancestor first. Cycle-safe; stops at
/// the first tenancy the sideloads don't cover.
pub fn parent_chain(document: &Document, tenant_id: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut seen = vec![tenant_id.to_owned()];
    let mut current = tenant_id.to_owned();

    loop {
        let Some(object) = document
            .included
            .iter()
            .find(|o| o.kind == TENANCIES_KIND && o.id.as_deref() == Some(current.as_str()))
        else {
            break;
        };
        let Some(parent_id) = parent_of(object) else {
            break;
        };
        if seen.contains(&parent_id) {
            break;
        }
        chain.push(parent_id.clone());
        seen.push(parent_id.clone());
        current = parent_id;
    }
    chain
}

/// A tenancy's parent id, from its relationship linkage or, for older
/// payloads, a flat `parent_id` attribute.
fn parent_of(object: &ResourceObject) -> Option<String> {
    if let Some(rel) = object.relationships.get("parent") {
        if let Some(RelationshipData::One(ref ident)) = rel.data {
            return Some(ident.id.clone());
        }
    }
    object
        .attributes
        .get("parent_id")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn login_json() -> serde_json::Value {
        json!({
            "token": "tok-1",
            "data": {
                "type": "users",
                "id": "u1",
                "attributes": { "name": "Ana", "email": "ana@example.com" },
                "relationships": {
                    "tenancy": { "data": { "type": "tenancies", "id": "t3" } },
                },
            },
            "included": [
                {
                    "type": "tenancies", "id": "t3",
                    "attributes": { "name": "Filial Sul" },
                    "relationships": { "parent": { "data": { "type": "tenancies", "id": "t2" } } },
                },
                {
                    "type": "tenancies", "id": "t2",
                    "attributes": { "name": "Regional" },
                    "relationships": { "parent": { "data": { "type": "tenancies", "id": "t1" } } },
                },
                { "type": "tenancies", "id": "t1", "attributes": { "name": "Matriz" } },
            ],
        })
    }

    #[test]
    fn login_derives_user_tenancy_and_parent_chain() {
        let response: LoginResponse = serde_json::from_value(login_json()).unwrap();
        let state = SessionState::from_login(&response).unwrap();

        assert_eq!(state.user.name, "Ana");
        assert_eq!(state.tenancy.as_ref().unwrap().id, "t3");
        assert_eq!(state.parent_chain, vec!["t2".to_owned(), "t1".to_owned()]);

        let ctx = state.request_context();
        assert_eq!(ctx.tenant_id.as_deref(), Some("t3"));
        assert_eq!(ctx.parent_tenants, vec!["t2".to_owned(), "t1".to_owned()]);
    }

    #[test]
    fn cached_blob_reselects_the_switched_tenancy() {
        let raw = login_json().to_string();
        let state = SessionState::from_cached_blob(&raw, Some("t2")).unwrap();

        assert_eq!(state.tenancy.as_ref().unwrap().name, "Regional");
        assert_eq!(state.parent_chain, vec!["t1".to_owned()]);
    }

    #[test]
    fn unknown_tenancy_selects_with_empty_chain() {
        let raw = login_json().to_string();
        let state = SessionState::from_cached_blob(&raw, Some("t9")).unwrap();

        assert_eq!(state.tenancy.as_ref().unwrap().id, "t9");
        assert!(state.parent_chain.is_empty());
    }

    #[test]
    fn cyclic_parent_links_terminate() {
        let doc: Document = serde_json::from_value(json!({
            "included": [
                {
                    "type": "tenancies", "id": "a",
                    "relationships": { "parent": { "data": { "type": "tenancies", "id": "b" } } },
                },
                {
                    "type": "tenancies", "id": "b",
                    "relationships": { "parent": { "data": { "type": "tenancies", "id": "a" } } },
                },
            ],
        }))
        .unwrap();

        assert_eq!(parent_chain(&doc, "a"), vec!["b".to_owned()]);
    }

    #[test]
    fn invalid_blob_is_a_session_error() {
        let err = SessionState::from_cached_blob("not json", None).unwrap_err();
        assert!(matches!(err, CoreError::SessionInvalid { .. }));
    }
}
