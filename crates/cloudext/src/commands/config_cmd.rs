//! Config subcommand handlers.

use std::collections::HashMap;

use dialoguer::{Input, Select};

use cloudext_config::{AuthType, Defaults, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// A copy of the config with plaintext secrets masked.
fn redacted(cfg: &Config) -> Config {
    let profiles = cfg
        .profiles
        .iter()
        .map(|(name, p)| {
            let mut p = p.clone();
            if p.password.is_some() {
                p.password = Some(REDACTED.into());
            }
            if p.token.is_some() {
                p.token = Some(REDACTED.into());
            }
            (name.clone(), p)
        })
        .collect();
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
        },
        profiles,
    }
}

/// Format an already-redacted config as TOML-like text.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "auth_url = \"{}\"", p.auth_url);
        let _ = writeln!(out, "region = \"{}\"", p.region);
        let auth_type = match p.auth_type {
            AuthType::Password => "password",
            AuthType::Token => "token",
        };
        let _ = writeln!(out, "auth_type = \"{auth_type}\"");
        let optional = [
            ("project_id", p.project_id.as_deref()),
            ("project_name", p.project_name.as_deref()),
            ("domain", p.domain.as_deref()),
            ("username", p.username.as_deref()),
            ("password", p.password.as_deref()),
            ("password_env", p.password_env.as_deref()),
            ("token", p.token.as_deref()),
            ("interface", p.interface.as_deref()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }

        let mut services: Vec<_> = p.services.iter().collect();
        services.sort_by_key(|(k, _)| k.as_str());
        for (service, opts) in services {
            let _ = writeln!(out);
            let _ = writeln!(out, "[profiles.{name}.services.{service}]");
            if let Some(ref v) = opts.api_version {
                let _ = writeln!(out, "api_version = \"{v}\"");
            }
            if let Some(ref e) = opts.endpoint_override {
                let _ = writeln!(out, "endpoint_override = \"{e}\"");
            }
        }
    }

    out
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::validation("interactive", format!("prompt failed: {e}"))
}

fn parse_bool(field: &str, value: &str) -> Result<bool, CliError> {
    value
        .parse()
        .map_err(|_| CliError::validation(field, "must be 'true' or 'false'"))
}

/// Offer to store a secret in the system keyring or return it for plaintext config.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_keyring_storage(
    profile_name: &str,
    kind: &str,
    secret: &str,
    label: &str,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {}?", label.to_lowercase()))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        cloudext_config::store_secret(profile_name, kind, secret)?;
        eprintln!("   ✓ {label} stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret.to_owned()))
    }
}

fn prompt_secret(label: &str) -> Result<String, CliError> {
    let secret = rpassword::prompt_password(format!("{label}: ")).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::validation(
            label.to_lowercase(),
            "value cannot be empty",
        ));
    }
    Ok(secret)
}

/// Apply `services.<type>.<option>` keys.
fn set_service_option(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    let mut parts = key.splitn(3, '.');
    let (Some("services"), Some(service), Some(option)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CliError::validation(key, "expected services.<type>.<option>"));
    };
    let opts = profile.services.entry(service.to_owned()).or_default();
    match option {
        "api_version" | "api-version" => opts.api_version = Some(value),
        "endpoint_override" | "endpoint-override" => {
            url::Url::parse(&value)
                .map_err(|e| CliError::validation(key, format!("invalid URL: {e}")))?;
            opts.endpoint_override = Some(value);
        }
        other => {
            return Err(CliError::validation(
                key,
                format!("unknown service option '{other}'. Valid: api_version, endpoint_override"),
            ));
        }
    }
    Ok(())
}

/// Apply one `config set` key to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "auth_url" | "auth-url" => profile.auth_url = value,
        "region" => profile.region = value,
        "project_id" | "project-id" => profile.project_id = Some(value),
        "project_name" | "project-name" => profile.project_name = Some(value),
        "domain" => profile.domain = Some(value),
        "auth_type" | "auth-type" => {
            profile.auth_type = match value.as_str() {
                "password" => AuthType::Password,
                "token" => AuthType::Token,
                _ => return Err(CliError::validation("auth_type", "must be 'password' or 'token'")),
            };
        }
        "username" => profile.username = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "interface" => {
            if !matches!(value.as_str(), "public" | "internal" | "admin") {
                return Err(CliError::validation(
                    "interface",
                    "must be 'public', 'internal', or 'admin'",
                ));
            }
            profile.interface = Some(value);
        }
        "insecure" => profile.insecure = Some(parse_bool("insecure", &value)?),
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| CliError::validation("timeout", "must be a number (seconds)"))?,
            );
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        k if k.starts_with("services.") => set_service_option(profile, k, value)?,
        other => {
            return Err(CliError::validation(
                other,
                format!(
                    "unknown config key '{other}'. Valid keys: auth_url, region, project_id, \
                     project_name, domain, auth_type, username, password_env, interface, \
                     insecure, timeout, ca_cert, services.<type>.api_version, \
                     services.<type>.endpoint_override"
                ),
            ));
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ cloudext configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let auth_url: String = Input::new()
                .with_prompt("Identity URL")
                .default("https://iam.example.com/v3".into())
                .interact_text()
                .map_err(prompt_err)?;
            url::Url::parse(&auth_url)
                .map_err(|e| CliError::validation("auth_url", format!("invalid URL: {e}")))?;

            let region: String = Input::new()
                .with_prompt("Region")
                .interact_text()
                .map_err(prompt_err)?;

            let project_id: String = Input::new()
                .with_prompt("Project ID")
                .interact_text()
                .map_err(prompt_err)?;

            let auth_choices = &["Username/Password", "Pre-issued token"];
            let auth_selection = Select::new()
                .with_prompt("Authentication method")
                .items(auth_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let mut profile = Profile {
                auth_url,
                region,
                project_id: Some(project_id),
                ..Profile::default()
            };

            if auth_selection == 0 {
                let domain: String = Input::new()
                    .with_prompt("User domain")
                    .interact_text()
                    .map_err(prompt_err)?;
                let username: String = Input::new()
                    .with_prompt("Username")
                    .interact_text()
                    .map_err(prompt_err)?;
                let password = prompt_secret("Password")?;

                profile.auth_type = AuthType::Password;
                profile.domain = Some(domain);
                profile.username = Some(username);
                profile.password =
                    prompt_keyring_storage(&profile_name, "password", &password, "Password")?;
            } else {
                let token = prompt_secret("Token")?;
                profile.auth_type = AuthType::Token;
                profile.token = prompt_keyring_storage(&profile_name, "token", &token, "Token")?;
            }

            let mut profiles = HashMap::new();
            profiles.insert(profile_name.clone(), profile);

            let cfg = Config {
                default_profile: Some(profile_name.clone()),
                defaults: Defaults::default(),
                profiles,
            };

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: cloudext endpoints");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            set_profile_key(profile, &key, value)?;

            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: cloudext config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let prof = cfg
                .profiles
                .get(&profile_name)
                .ok_or_else(|| CliError::ProfileNotFound {
                    name: profile_name.clone(),
                    available: config::available_profiles(&cfg),
                })?;

            let (kind, label) = match prof.auth_type {
                AuthType::Password => ("password", "Password"),
                AuthType::Token => ("token", "Token"),
            };
            let secret = prompt_secret(label)?;
            cloudext_config::store_secret(&profile_name, kind, &secret)?;

            eprintln!("✓ {label} stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
