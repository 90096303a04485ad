// Request context and session hooks.
//
// The original design read tenant and token out of ambient storage on
// every call. Here the context is an explicit value the client holds
// and swaps atomically: a tenant switch or logout takes effect on the
// next call issued, never on calls already in flight.

use secrecy::SecretString;

/// Everything a single request needs from the current session: bearer
/// token, selected tenant, and the tenant's ancestor chain (used for
/// sharing classification, not for URL building).
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub token: Option<SecretString>,
    pub tenant_id: Option<String>,
    /// Parent-tenancy ids, nearest first, resolved from the cached
    /// login payload's sideloads.
    pub parent_tenants: Vec<String>,
}

impl RequestContext {
    /// An unauthenticated, tenant-less context.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context with a token but no tenant selected yet (between login
    /// and tenant selection).
    pub fn authenticated(token: SecretString) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_parent_tenants(mut self, parents: Vec<String>) -> Self {
        self.parent_tenants = parents;
        self
    }
}

/// Side-effect extension points invoked by the client on auth-related
/// responses. The triggering call still rejects; these hooks exist so
/// the embedding application can tear down or route without the access
/// layer owning persisted state.
pub trait SessionHooks: Send + Sync {
    /// HTTP 401, or the backend's literal "Unauthenticated." body.
    /// Implementations clear persisted session state here.
    fn on_unauthenticated(&self) {}

    /// HTTP 403. Kept as a distinct branch from the generic error path
    /// so policy routing can be added without touching it.
    fn on_access_denied(&self, _message: &str) {}
}

/// Default hook set: no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}
