//! CLI configuration: a thin wrapper around `cloudext_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--auth-url, --region, --token, ...).

use cloudext_config::{AuthType, Profile};
use cloudext_core::{AuthCredentials, ConnectionConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use cloudext_config::{Config, config_path, load_config, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Apply CLI flag overrides on top of a profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref url) = global.auth_url {
        profile.auth_url.clone_from(url);
    }
    if let Some(ref region) = global.region {
        profile.region.clone_from(region);
    }
    if let Some(ref project) = global.project_id {
        profile.project_id = Some(project.clone());
    }
    if let Some(ref token) = global.token {
        profile.auth_type = AuthType::Token;
        profile.token = Some(token.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

/// Build a `ConnectionConfig` from the config file, active profile, and
/// CLI overrides.
///
/// Without a matching profile, the flags alone must describe the cloud.
pub fn build_connection_config(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p.clone(),
        None if global.auth_url.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if profile.timeout.is_none() {
        profile.timeout = Some(cfg.defaults.timeout);
    }
    if cfg.defaults.insecure && profile.insecure.is_none() {
        profile.insecure = Some(true);
    }
    apply_overrides(&mut profile, global);

    let mut connection = cloudext_config::profile_to_connection_config(&profile, &profile_name)?;
    // An explicit --token beats the environment and the keyring.
    if let Some(ref token) = global.token {
        connection.auth = AuthCredentials::Token(token.clone().into());
    }
    Ok(connection)
}

pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
