//! Command handlers and shared wiring.

pub mod auth;
pub mod collaborators;
pub mod movements;
pub mod orders;
pub mod report;
pub mod tenants;
pub mod tools;

use std::sync::Arc;
use std::time::Duration;

use almoxa_api::{ApiClient, ParamMap, RequestContext, SessionHooks, TlsMode, TransportConfig};
use almoxa_config::SessionFiles;
use almoxa_core::SessionState;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::OutputFormat;

/// Everything a command handler needs: the wired client, the session
/// files (for login/logout/tenant writes), the parsed session, and the
/// chosen output format.
pub struct App {
    pub client: ApiClient,
    pub files: SessionFiles,
    pub session: Option<SessionState>,
    pub output: OutputFormat,
}

/// Hook installed on every client: a rejected session clears the
/// persisted login so the next command starts clean.
struct TeardownHooks {
    files: SessionFiles,
}

impl SessionHooks for TeardownHooks {
    fn on_unauthenticated(&self) {
        tracing::warn!("session rejected by the server; clearing persisted login");
        self.files.clear();
    }
}

/// Build the client from config profile + CLI overrides + persisted
/// session. Works unauthenticated too (login needs it that way).
pub fn connect(global: &GlobalOpts) -> Result<App, CliError> {
    let cfg = almoxa_config::load_config_or_default();
    let profile_name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = cfg.profiles.get(&profile_name);

    let server = global
        .server
        .clone()
        .or_else(|| profile.map(|p| p.server.clone()))
        .ok_or_else(|| CliError::NoConfig {
            path: almoxa_config::config_path().display().to_string(),
        })?;

    let insecure = global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);
    let tls = if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca)
    } else {
        TlsMode::System
    };
    let timeout = profile.and_then(|p| p.timeout).unwrap_or(global.timeout);
    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(timeout),
        cookie_jar: None,
    };

    let files = SessionFiles::default_location();
    let selected_tenant = global
        .tenant
        .clone()
        .or_else(|| files.load_tenant_id())
        .or_else(|| profile.and_then(|p| p.tenant.clone()));

    let session = files.load_session_blob().and_then(|blob| {
        SessionState::from_cached_blob(&blob, selected_tenant.as_deref())
            .inspect_err(|e| tracing::debug!("ignoring stale session blob: {e}"))
            .ok()
    });

    let hooks: Arc<dyn SessionHooks> = Arc::new(TeardownHooks {
        files: files.clone(),
    });
    let client = ApiClient::new(&server, &transport)
        .map_err(almoxa_core::CoreError::from)?
        .with_hooks(hooks);

    if let Some(ref session) = session {
        client.set_context(session.request_context());
    } else if let Some(token) = files.resolve_token() {
        let mut ctx = RequestContext::authenticated(token);
        if let Some(tenant) = selected_tenant {
            ctx = ctx.with_tenant(tenant);
        }
        client.set_context(ctx);
    }

    Ok(App {
        client,
        files,
        session,
        output: global.output,
    })
}

/// Dispatch a parsed command.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(args, global).await,
        Command::Logout => auth::logout(global).await,
        Command::Tenants(cmd) => tenants::handle(cmd, global).await,
        Command::Tools(cmd) => tools::handle(cmd, global).await,
        Command::Collaborators(cmd) => collaborators::handle(cmd, global).await,
        Command::Movements(cmd) => movements::handle(cmd, global).await,
        Command::Orders(cmd) => orders::handle(cmd, global).await,
        Command::Report => report::handle(global).await,
        // Handled in main before a client is built.
        Command::Completions(_) => Ok(()),
    }
}

/// Prompt for confirmation, auto-approving when `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<(), CliError> {
    if yes_flag {
        return Ok(());
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    if confirmed { Ok(()) } else { Err(CliError::Aborted) }
}

/// Build a `ParamMap` from a `json!` object literal.
pub fn params(value: serde_json::Value) -> ParamMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => ParamMap::new(),
    }
}
