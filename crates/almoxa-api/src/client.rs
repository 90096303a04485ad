// Tenant-scoped API client.
//
// Wraps `reqwest::Client` with bearer-token injection, tenant
// placeholder substitution, bracket-encoded queries, and response
// normalization. Endpoint modules (items, collaborators, etc.) are
// implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use std::sync::Arc;

use arc_swap::ArcSwap;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::context::{NoopHooks, RequestContext, SessionHooks};
use crate::error::{Error, GENERIC_ERROR_MESSAGE};
use crate::query::ParamMap;
use crate::request::{Operation, resolve_template};
use crate::resource::{Resource, materialize_many, materialize_many_embedded, materialize_one};
use crate::transport::TransportConfig;
use crate::wire::Document;

/// The backend's exact unauthenticated-session body. Some proxies
/// rewrite the status code, so detection is by message OR status,
/// each sufficient alone.
const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated.";

/// Async client for the tenant-scoped inventory API.
///
/// Constructed explicitly with its base URL and transport settings --
/// there is no lazy first-call initialization. The request context
/// (token + tenant) is swapped atomically: an update applies to the
/// next call issued, never to calls already in flight.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    context: ArcSwap<RequestContext>,
    hooks: Arc<dyn SessionHooks>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config, starting anonymous.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            context: ArcSwap::from_pointee(RequestContext::anonymous()),
            hooks: Arc::new(NoopHooks),
        })
    }

    /// Install session hooks (teardown on 401, access-denied routing).
    pub fn with_hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    // ── Context ──────────────────────────────────────────────────────

    /// Replace the request context (login, tenant switch, logout).
    pub fn set_context(&self, context: RequestContext) {
        self.context.store(Arc::new(context));
    }

    /// Snapshot of the context the next call would use.
    pub fn context(&self) -> Arc<RequestContext> {
        self.context.load_full()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Execute one operation against a collection path template.
    ///
    /// Resolves tenant placeholders (failing pre-flight when a
    /// placeholder has no tenant), attaches the bearer token when one
    /// is present, and normalizes the response.
    pub async fn execute(&self, template: &str, op: &Operation) -> Result<Document, Error> {
        let body = self
            .dispatch(
                template,
                op.path_suffix(),
                op.http_method(),
                op.query_string(),
                op.body(),
            )
            .await?;
        parse_json(&body)
    }

    /// Low-level dispatch shared by `execute` and the auth endpoints
    /// (whose responses are not plain documents). Returns the raw body
    /// of a successful response; all error normalization happens here.
    pub(crate) async fn dispatch(
        &self,
        template: &str,
        suffix: Option<String>,
        method: reqwest::Method,
        query: Option<String>,
        body: Option<&Value>,
    ) -> Result<String, Error> {
        let ctx = self.context.load_full();
        let mut path = resolve_template(template, ctx.tenant_id.as_deref())?;
        if let Some(suffix) = suffix {
            path = format!("{path}/{suffix}");
        }

        let mut url = self.base_url.join(&path)?;
        if let Some(query) = query {
            url.set_query(Some(&query));
        }

        debug!("{method} {url}");

        let mut request = self.http.request(method, url);
        if let Some(ref token) = ctx.token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::Transport)?;
        self.handle_response(response).await
    }

    // ── Typed wrappers ───────────────────────────────────────────────

    /// List the collection, materializing each row with its includes.
    pub async fn list(&self, template: &str, params: ParamMap) -> Result<Vec<Resource>, Error> {
        let doc = self.execute(template, &Operation::list(params)).await?;
        materialize_many(&doc)
    }

    /// List rows that embed a nested collection under `field`.
    pub async fn list_embedded(
        &self,
        template: &str,
        params: ParamMap,
        field: &str,
    ) -> Result<Vec<Resource>, Error> {
        let doc = self.execute(template, &Operation::list(params)).await?;
        materialize_many_embedded(&doc, field)
    }

    /// Fetch one entity by id.
    pub async fn find(&self, template: &str, id: &str) -> Result<Resource, Error> {
        let doc = self.execute(template, &Operation::find(id)).await?;
        materialize_one(&doc)
    }

    /// Dispatch a named creation verb: `POST <path>/<name>`.
    pub async fn post_action(
        &self,
        template: &str,
        name: &str,
        body: Value,
    ) -> Result<Document, Error> {
        self.execute(template, &Operation::post_action(name, body))
            .await
    }

    /// Dispatch a named mutation verb: `PUT <path>/<name>`.
    pub async fn put_action(
        &self,
        template: &str,
        name: &str,
        body: Value,
    ) -> Result<Document, Error> {
        self.execute(template, &Operation::put_action(name, body))
            .await
    }

    /// Delete one or more entities by id: `DELETE <path>/<id1,id2>`.
    pub async fn remove_ids(&self, template: &str, ids: &[String]) -> Result<(), Error> {
        self.execute(template, &Operation::remove(ids.to_vec()))
            .await?;
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();
        let body = response.text().await.map_err(Error::Transport)?;
        let message = extract_message(&body);

        // Session teardown fires on the status OR the literal message;
        // either alone is sufficient. The call still rejects.
        if status == StatusCode::UNAUTHORIZED
            || message.as_deref() == Some(UNAUTHENTICATED_MESSAGE)
        {
            self.hooks.on_unauthenticated();
            return Err(Error::Unauthenticated {
                message: message
                    .unwrap_or_else(|| "session expired or invalid credentials".into()),
            });
        }

        if status.is_success() {
            return Ok(body);
        }

        if status == StatusCode::FORBIDDEN {
            let message = message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.into());
            self.hooks.on_access_denied(&message);
            return Err(Error::AccessDenied { message });
        }

        Err(Error::Api {
            message: message.unwrap_or_else(|| {
                if body.is_empty() {
                    GENERIC_ERROR_MESSAGE.into()
                } else {
                    body
                }
            }),
            status: status.as_u16(),
        })
    }
}

/// Parse a successful response body, treating an empty body as an
/// empty value (actions with nothing to say return 204).
pub(crate) fn parse_json<T: serde::de::DeserializeOwned + Default>(
    body: &str,
) -> Result<T, Error> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body).map_err(|e| {
        let preview = &body[..body.len().min(200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

/// Extract the human-readable message from an error body: a bare JSON
/// string is used directly, an object's `message` field otherwise.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

/// Parse and normalize the base URL so relative joins append cleanly.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_a_trailing_slash() {
        let url = normalize_base_url("https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");

        let url = normalize_base_url("https://api.example.com/v1/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn message_extraction_handles_all_body_shapes() {
        assert_eq!(
            extract_message(r#"{"message":"Validation failed"}"#).as_deref(),
            Some("Validation failed")
        );
        assert_eq!(
            extract_message(r#""Unauthenticated.""#).as_deref(),
            Some("Unauthenticated.")
        );
        assert_eq!(extract_message(r#"{"error":"x"}"#), None);
        assert_eq!(extract_message("<html>oops</html>"), None);
    }
}
