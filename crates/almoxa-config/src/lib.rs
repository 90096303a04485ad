//! Configuration and persisted session state for the almoxa CLI.
//!
//! TOML profiles (server URL, TLS, timeout) loaded via figment, plus
//! the session files the access layer's auth hooks tear down: the
//! cached login blob, the bearer token, and the selected tenant's id
//! and name. Token resolution walks env var -> keyring -> token file
//! -> cached login blob.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Env var checked first in the token chain.
pub const TOKEN_ENV_VAR: &str = "ALMOXA_TOKEN";

const KEYRING_SERVICE: &str = "almoxa";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' in {path}")]
    NoProfile { profile: String, path: String },

    #[error("not logged in -- run `almoxa login`")]
    NoSession,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://api.example.com/v1").
    pub server: String,

    /// Tenant selected by default for this profile.
    pub tenant: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "almoxa", "almoxa").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory holding the persisted session files.
pub fn session_dir() -> PathBuf {
    ProjectDirs::from("com", "almoxa", "almoxa")
        .map_or_else(dirs_fallback, |dirs| dirs.data_dir().to_path_buf())
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("almoxa");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("ALMOXA_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Persisted session state ─────────────────────────────────────────

/// The four persisted session keys, file-backed under one directory:
/// the cached login blob, the bearer token, and the selected tenant's
/// id and name. The token is additionally mirrored into the system
/// keyring when one is available.
#[derive(Debug, Clone)]
pub struct SessionFiles {
    dir: PathBuf,
}

impl SessionFiles {
    /// Session files at the platform-default data directory.
    pub fn default_location() -> Self {
        Self { dir: session_dir() }
    }

    /// Session files rooted at an explicit directory (tests, overrides).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn session_blob_path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.join("token")
    }

    pub fn tenant_id_path(&self) -> PathBuf {
        self.dir.join("tenant_id")
    }

    pub fn tenant_name_path(&self) -> PathBuf {
        self.dir.join("tenant_name")
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Persist a fresh login: the raw response blob, the token, and the
    /// initially selected tenant.
    pub fn store_login(
        &self,
        blob: &str,
        token: &str,
        tenant_id: Option<&str>,
        tenant_name: Option<&str>,
    ) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.session_blob_path(), blob)?;
        std::fs::write(self.token_path(), token)?;
        keyring_set(token);
        if let Some(id) = tenant_id {
            std::fs::write(self.tenant_id_path(), id)?;
        }
        if let Some(name) = tenant_name {
            std::fs::write(self.tenant_name_path(), name)?;
        }
        Ok(())
    }

    /// Persist a tenant switch.
    pub fn store_tenant(&self, tenant_id: &str, tenant_name: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.tenant_id_path(), tenant_id)?;
        std::fs::write(self.tenant_name_path(), tenant_name)?;
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn load_session_blob(&self) -> Option<String> {
        read_trimmed(&self.session_blob_path())
    }

    pub fn load_tenant_id(&self) -> Option<String> {
        read_trimmed(&self.tenant_id_path())
    }

    pub fn load_tenant_name(&self) -> Option<String> {
        read_trimmed(&self.tenant_name_path())
    }

    /// Resolve the bearer token through the fallback chain:
    /// env var -> keyring -> token file -> cached login blob.
    pub fn resolve_token(&self) -> Option<SecretString> {
        if let Ok(val) = std::env::var(TOKEN_ENV_VAR) {
            if !val.is_empty() {
                return Some(SecretString::from(val));
            }
        }

        if let Some(secret) = keyring_get() {
            return Some(SecretString::from(secret));
        }

        if let Some(token) = read_trimmed(&self.token_path()) {
            return Some(SecretString::from(token));
        }

        // Last resort: the token embedded in the cached login response.
        let blob = self.load_session_blob()?;
        let value: serde_json::Value = serde_json::from_str(&blob).ok()?;
        value
            .get("token")
            .and_then(|t| t.as_str())
            .map(|t| SecretString::from(t.to_owned()))
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// Remove every persisted session key. This is the 401 teardown
    /// target: blob, token (file and keyring), tenant id, tenant name.
    pub fn clear(&self) {
        for path in [
            self.session_blob_path(),
            self.token_path(),
            self.tenant_id_path(),
            self.tenant_name_path(),
        ] {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    debug!("failed to remove {}: {e}", path.display());
                }
            }
        }
        keyring_delete();
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

// Keyring access is best-effort: headless machines without a secret
// service fall back to the token file.

fn keyring_set(token: &str) {
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, "token") {
        if let Err(e) = entry.set_password(token) {
            debug!("keyring store failed: {e}");
        }
    }
}

fn keyring_get() -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, "token")
        .ok()?
        .get_password()
        .ok()
}

fn keyring_delete() {
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, "token") {
        if let Err(e) = entry.delete_credential() {
            debug!("keyring delete failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> (tempfile::TempDir, SessionFiles) {
        let dir = tempfile::tempdir().unwrap();
        let files = SessionFiles::at(dir.path());
        (dir, files)
    }

    #[test]
    fn store_login_writes_all_four_keys() {
        let (_dir, files) = files();

        files
            .store_login(r#"{"token":"t"}"#, "t", Some("42"), Some("Matriz"))
            .unwrap();

        assert!(files.session_blob_path().exists());
        assert!(files.token_path().exists());
        assert_eq!(files.load_tenant_id().as_deref(), Some("42"));
        assert_eq!(files.load_tenant_name().as_deref(), Some("Matriz"));
    }

    #[test]
    fn clear_removes_all_four_keys() {
        let (_dir, files) = files();
        files
            .store_login(r#"{"token":"t"}"#, "t", Some("42"), Some("Matriz"))
            .unwrap();

        files.clear();

        assert!(!files.session_blob_path().exists());
        assert!(!files.token_path().exists());
        assert!(!files.tenant_id_path().exists());
        assert!(!files.tenant_name_path().exists());
        assert!(files.load_session_blob().is_none());
    }

    #[test]
    fn clear_on_empty_directory_is_silent() {
        let (_dir, files) = files();
        files.clear();
    }

    #[test]
    fn token_falls_back_to_session_blob() {
        let (_dir, files) = files();
        files
            .store_login(r#"{"token":"embedded"}"#, "ignored", None, None)
            .unwrap();
        // Remove the direct token key; the blob still carries it.
        std::fs::remove_file(files.token_path()).unwrap();

        let token = files.resolve_token();
        assert!(token.is_some());
    }

    #[test]
    fn tenant_switch_overwrites_selection() {
        let (_dir, files) = files();
        files.store_tenant("1", "Matriz").unwrap();
        files.store_tenant("2", "Filial").unwrap();

        assert_eq!(files.load_tenant_id().as_deref(), Some("2"));
        assert_eq!(files.load_tenant_name().as_deref(), Some("Filial"));
    }
}
