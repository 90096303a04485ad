// Core error types.
//
// User-facing errors from almoxa-core. Consumers never see raw HTTP
// statuses or JSON parse failures directly; the `From<almoxa_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No tenant selected -- pick one with `tenants use`")]
    NoTenantSelected,

    #[error("Session expired -- log in again")]
    SessionExpired,

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Cannot reach the server: {reason}")]
    ConnectionFailed { reason: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Invalid cached session: {reason}")]
    SessionInvalid { reason: String },

    #[error("API error: {message}")]
    Api { message: String, status: u16 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<almoxa_api::Error> for CoreError {
    fn from(err: almoxa_api::Error) -> Self {
        use almoxa_api::Error as Api;
        match err {
            Api::MissingTenant { .. } => Self::NoTenantSelected,
            Api::Unauthenticated { .. } => Self::SessionExpired,
            Api::AccessDenied { message } => Self::AccessDenied { message },
            Api::Transport(e) => Self::ConnectionFailed {
                reason: e.to_string(),
            },
            Api::Api { message, status } => Self::Api { message, status },
            other => Self::Internal(other.to_string()),
        }
    }
}
