//! Configuration for the cloudext CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `cloudext_core::ConnectionConfig`. The CLI layers its
//! `GlobalOpts` flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cloudext_core::{
    AuthCredentials, ConnectionConfig, Interface, ProjectScope, ServiceOptions, TlsVerification,
};

/// Keyring service name; entries are keyed `{profile}/password` and `{profile}/token`.
pub const KEYRING_SERVICE: &str = "cloudext";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CLOUDEXT_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

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

    /// Named cloud profiles.
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

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// How a profile authenticates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Password,
    Token,
}

/// A named cloud profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Identity endpoint (e.g., "https://iam.eu-de.example.com/v3").
    pub auth_url: String,

    /// Region the catalog is filtered by.
    pub region: String,

    /// Project id; takes precedence over `project_name`.
    pub project_id: Option<String>,

    pub project_name: Option<String>,

    /// Domain of the user, and of the project when scoped by name.
    pub domain: Option<String>,

    #[serde(default)]
    pub auth_type: AuthType,

    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Pre-issued token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Catalog interface: public, internal or admin.
    pub interface: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Resolver options keyed by service type.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub services: HashMap<String, ServiceOptions>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `CLOUDEXT_CONFIG`, then platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "cloudext", "cloudext").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cloudext");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from a specific file + environment.
///
/// Environment keys nest on `__`, e.g. `CLOUDEXT_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CLOUDEXT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_secret(profile_name: &str, kind: &str) -> Option<SecretString> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{kind}"))
        .and_then(|entry| entry.get_password())
        .ok()
        .map(SecretString::from)
}

/// Store a secret for a profile in the system keyring.
pub fn store_secret(profile_name: &str, kind: &str, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{kind}"))?;
    entry.set_password(secret)?;
    Ok(())
}

/// Resolve a password: `password_env`, `CLOUDEXT_PASSWORD`, keyring, plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Generic env var
    if let Ok(pw) = std::env::var("CLOUDEXT_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 3. System keyring
    if let Some(secret) = keyring_secret(profile_name, "password") {
        return Ok(secret);
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve a token: `CLOUDEXT_TOKEN`, keyring, plaintext.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Ok(token) = std::env::var("CLOUDEXT_TOKEN") {
        return Ok(SecretString::from(token));
    }
    if let Some(secret) = keyring_secret(profile_name, "token") {
        return Ok(secret);
    }
    profile
        .token
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve `AuthCredentials` from a profile's `auth_type`.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    match profile.auth_type {
        AuthType::Password => {
            let username = profile
                .username
                .clone()
                .or_else(|| std::env::var("CLOUDEXT_USERNAME").ok())
                .ok_or_else(|| ConfigError::NoCredentials {
                    profile: profile_name.into(),
                })?;
            let password = resolve_password(profile, profile_name)?;
            Ok(AuthCredentials::Password {
                username,
                password,
                user_domain: domain(profile)?,
            })
        }
        AuthType::Token => Ok(AuthCredentials::Token(resolve_token(profile, profile_name)?)),
    }
}

fn domain(profile: &Profile) -> Result<String, ConfigError> {
    profile.domain.clone().ok_or_else(|| ConfigError::Validation {
        field: "domain".into(),
        reason: "required for password auth and name-scoped projects".into(),
    })
}

/// Project scope: `project_id` wins over `project_name` + `domain`.
pub fn resolve_project(profile: &Profile) -> Result<ProjectScope, ConfigError> {
    if let Some(ref id) = profile.project_id {
        return Ok(ProjectScope::Id(id.clone()));
    }
    if let Some(ref name) = profile.project_name {
        return Ok(ProjectScope::Name {
            name: name.clone(),
            domain_name: domain(profile)?,
        });
    }
    Err(ConfigError::Validation {
        field: "project".into(),
        reason: "set project_id or project_name".into(),
    })
}

/// Build a `ConnectionConfig` from a profile, no CLI flag overrides.
pub fn profile_to_connection_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ConnectionConfig, ConfigError> {
    let auth_url: url::Url = profile
        .auth_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "auth_url".into(),
            reason: format!("invalid URL: {}", profile.auth_url),
        })?;

    if profile.region.is_empty() {
        return Err(ConfigError::Validation {
            field: "region".into(),
            reason: "must not be empty".into(),
        });
    }

    let auth = resolve_auth(profile, profile_name)?;
    let project = resolve_project(profile)?;

    let mut config = ConnectionConfig::new(auth_url, auth, project, profile.region.clone());

    if let Some(ref iface) = profile.interface {
        config.interface = iface.parse::<Interface>().map_err(|_| ConfigError::Validation {
            field: "interface".into(),
            reason: format!("expected 'public', 'internal', or 'admin', got '{iface}'"),
        })?;
    }

    config.tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    config.timeout = Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout));
    config.services = profile.services.clone();

    Ok(config)
}
