//! Login and logout.

use almoxa_core::SessionState;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::commands::connect;
use crate::error::CliError;

pub async fn login(args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    let email = match args.email {
        Some(email) => email,
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    let response = app.client.login(&email, &password).await?;
    let session = SessionState::from_login(&response)?;

    // The whole response is the cached session blob; tenancy context is
    // re-derived from it on every later command.
    let blob = serde_json::to_string(&response)?;
    app.files.store_login(
        &blob,
        &response.token,
        session.tenancy.as_ref().map(|t| t.id.as_str()),
        session.tenancy.as_ref().map(|t| t.name.as_str()),
    )?;

    println!("Logged in as {} <{}>", session.user.name, email);
    match session.tenancy {
        Some(ref tenancy) => println!("Acting in tenancy {} -- {}", tenancy.id, tenancy.name),
        None => println!("No tenancy assigned yet; pick one with `almoxa tenants use <id>`"),
    }
    Ok(())
}

pub async fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let app = connect(global)?;

    // Best-effort server-side invalidation; a dead session already
    // counts as logged out.
    if let Err(e) = app.client.logout().await {
        tracing::debug!("server-side logout failed: {e}");
    }
    app.files.clear();

    match app.session {
        Some(ref session) => println!("Logged out {}.", session.user.name),
        None => println!("Logged out."),
    }
    Ok(())
}
