use thiserror::Error;

/// Fallback message when an error response carries no usable body.
pub const GENERIC_ERROR_MESSAGE: &str = "The request could not be completed.";

/// Top-level error type for the `almoxa-api` crate.
///
/// Every failure a caller can see is normalized into one of these
/// variants. `almoxa-core` maps them into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Pre-flight ──────────────────────────────────────────────────
    /// The path template contains a tenant placeholder but no tenant is
    /// selected. Raised before any network I/O.
    #[error("No tenant selected for tenant-scoped path '{path}'")]
    MissingTenant { path: String },

    // ── Authentication / authorization ──────────────────────────────
    /// The session is no longer valid (HTTP 401, or the backend's
    /// literal "Unauthenticated." body on any status).
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// HTTP 403 -- the authenticated user may not perform this action.
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Any other non-2xx response, with the message extracted from the
    /// body (or a generic fallback) and the HTTP status.
    #[error("API error (HTTP {status}): {message}")]
    Api { message: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is the pre-flight cancellation raised when
    /// a tenant placeholder cannot be resolved. No request was issued.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::MissingTenant { .. })
    }

    /// Returns `true` if this error means the session is gone and a new
    /// login is required.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    /// The HTTP status associated with this error, or 0 when no HTTP
    /// response produced it (cancellation, transport failures, parsing).
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Unauthenticated { .. } => 401,
            Self::AccessDenied { .. } => 403,
            Self::Transport(e) => e.status().map_or(0, |s| s.as_u16()),
            _ => 0,
        }
    }
}
