// Request kinds and tenant-scoped path resolution.
//
// The backend layers named verbs over REST-ish collection paths:
// non-trivial writes go to `<path>/<verb-name>` as POST or PUT. That
// convention is an explicit tagged union here, with one URL builder,
// instead of ad hoc string concatenation at every call site.

use reqwest::Method;
use serde_json::Value;

use crate::error::Error;
use crate::query::{ParamMap, encode_query};

/// Placeholder tokens a collection path may carry. Both spellings are
/// in live use on the backend.
const TENANT_PLACEHOLDERS: [&str; 2] = [":tenant_id", ":tenancy_id"];

/// HTTP method for a named action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMethod {
    /// Creations and create-or-update verbs.
    Post,
    /// Mutations of existing entities.
    Put,
}

/// One request against an entity's collection path.
#[derive(Debug, Clone)]
pub enum Operation {
    /// `GET <path>?<bracket-query>`
    List { params: ParamMap },
    /// `GET <path>/<id>`
    Find { id: String },
    /// `POST|PUT <path>/<name>` with a JSON body.
    Action {
        name: String,
        method: ActionMethod,
        body: Value,
    },
    /// `DELETE <path>/<id1,id2,...>`
    Remove { ids: Vec<String> },
}

impl Operation {
    pub fn list(params: ParamMap) -> Self {
        Self::List { params }
    }

    pub fn find(id: impl Into<String>) -> Self {
        Self::Find { id: id.into() }
    }

    pub fn post_action(name: impl Into<String>, body: Value) -> Self {
        Self::Action {
            name: name.into(),
            method: ActionMethod::Post,
            body,
        }
    }

    pub fn put_action(name: impl Into<String>, body: Value) -> Self {
        Self::Action {
            name: name.into(),
            method: ActionMethod::Put,
            body,
        }
    }

    pub fn remove(ids: Vec<String>) -> Self {
        Self::Remove { ids }
    }

    pub fn http_method(&self) -> Method {
        match self {
            Self::List { .. } | Self::Find { .. } => Method::GET,
            Self::Action { method, .. } => match method {
                ActionMethod::Post => Method::POST,
                ActionMethod::Put => Method::PUT,
            },
            Self::Remove { .. } => Method::DELETE,
        }
    }

    /// Path segment appended after the collection path, if any.
    pub fn path_suffix(&self) -> Option<String> {
        match self {
            Self::List { .. } => None,
            Self::Find { id } => Some(id.clone()),
            Self::Action { name, .. } => Some(name.clone()),
            Self::Remove { ids } => Some(ids.join(",")),
        }
    }

    /// Encoded query string, when this operation carries parameters.
    pub fn query_string(&self) -> Option<String> {
        match self {
            Self::List { params } if !params.is_empty() => Some(encode_query(params)),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Action { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Substitute every tenant placeholder in `template` with the selected
/// tenant id. A template that carries a placeholder with no tenant
/// available is a pre-flight cancellation: the request never reaches
/// the network.
pub fn resolve_template(template: &str, tenant_id: Option<&str>) -> Result<String, Error> {
    let has_placeholder = TENANT_PLACEHOLDERS.iter().any(|p| template.contains(p));
    if !has_placeholder {
        return Ok(template.to_owned());
    }
    let Some(tenant) = tenant_id else {
        return Err(Error::MissingTenant {
            path: template.to_owned(),
        });
    };
    let mut resolved = template.to_owned();
    for placeholder in TENANT_PLACEHOLDERS {
        resolved = resolved.replace(placeholder, tenant);
    }
    Ok(resolved)
}
