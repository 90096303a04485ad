use miette::Diagnostic;
use thiserror::Error;

use almoxa_core::CoreError;

/// CLI-level error with distinct exit codes per failure class.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] almoxa_config::ConfigError),

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{entity} not found: {identifier}")]
    #[diagnostic(help("list them with `almoxa {list_command}`"))]
    NotFound {
        entity: String,
        identifier: String,
        list_command: String,
    },

    #[error("no server configured -- pass --server or create {path}")]
    NoConfig { path: String },

    #[error("aborted")]
    Aborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<almoxa_api::Error> for CliError {
    fn from(err: almoxa_api::Error) -> Self {
        Self::Core(CoreError::from(err))
    }
}

impl CliError {
    /// Process exit code: 2 usage/validation, 3 connectivity,
    /// 4 authentication, 5 authorization, 1 everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::NoConfig { .. } | Self::NotFound { .. } => 2,
            Self::Core(CoreError::ConnectionFailed { .. }) => 3,
            Self::Core(CoreError::SessionExpired | CoreError::NoTenantSelected) => 4,
            Self::Core(CoreError::AccessDenied { .. }) => 5,
            _ => 1,
        }
    }
}
