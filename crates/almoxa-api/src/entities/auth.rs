// Authentication endpoints.
//
// Login is the one unscoped POST in the system; its response carries
// the bearer token alongside a regular document (the current user with
// tenancy sideloads). The whole response is what gets cached as the
// session blob.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{ApiClient, parse_json};
use crate::error::Error;
use crate::wire::Document;

pub const LOGIN_PATH: &str = "login";
pub const LOGOUT_PATH: &str = "logout";

/// Successful login payload: `{ token, data, included }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub document: Document,
}

impl ApiClient {
    /// Authenticate with email and password.
    ///
    /// Does not mutate the client's context; the caller decides what to
    /// persist and when to install the new session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Error> {
        let body = json!({ "email": email, "password": password });
        let text = self
            .dispatch(LOGIN_PATH, None, Method::POST, None, Some(&body))
            .await?;
        parse_json(&text)
    }

    /// Invalidate the server-side session. Best-effort: a dead session
    /// already rejects with `Unauthenticated`, which callers treat as
    /// success.
    pub async fn logout(&self) -> Result<(), Error> {
        self.dispatch(LOGOUT_PATH, None, Method::POST, None, None)
            .await?;
        Ok(())
    }
}
