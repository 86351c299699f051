// ── Runtime connection configuration ──
//
// Describes *how* to reach one region of the cloud: identity endpoint,
// credentials, project scope, transport tuning and per-service resolver
// options. Never touches disk; the CLI builds a `ConnectionConfig` from its
// profile and hands it in.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use cloudext_api::{Credentials, Interface, ProjectScope, ServiceOptions, TlsMode, TransportConfig};

/// How to authenticate against the identity service.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    Password {
        username: String,
        password: SecretString,
        /// Domain the user lives in.
        user_domain: String,
    },
    /// A pre-issued token, re-scoped to the configured project.
    Token(SecretString),
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (lab clouds with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for connecting to one region.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Identity endpoint, e.g. `https://iam.eu-de.example.com/v3`.
    pub auth_url: Url,
    pub auth: AuthCredentials,
    pub project: ProjectScope,
    pub region: String,
    pub interface: Interface,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Resolver options keyed by service type (`apig`, `vlb`, ...).
    pub services: HashMap<String, ServiceOptions>,
}

impl ConnectionConfig {
    pub fn new(
        auth_url: Url,
        auth: AuthCredentials,
        project: ProjectScope,
        region: impl Into<String>,
    ) -> Self {
        Self {
            auth_url,
            auth,
            project,
            region: region.into(),
            interface: Interface::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            services: HashMap::new(),
        }
    }

    /// Identity request credentials.
    pub fn credentials(&self) -> Credentials {
        match &self.auth {
            AuthCredentials::Password {
                username,
                password,
                user_domain,
            } => Credentials::Password {
                auth_url: self.auth_url.clone(),
                username: username.clone(),
                password: password.clone(),
                user_domain_name: user_domain.clone(),
                project: self.project.clone(),
            },
            AuthCredentials::Token(token) => Credentials::Token {
                auth_url: self.auth_url.clone(),
                token: token.clone(),
                project: self.project.clone(),
            },
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }

    /// Resolver options for a service; empty when unconfigured.
    pub fn service_options(&self, service_type: &str) -> ServiceOptions {
        self.services.get(service_type).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig::new(
            Url::parse("https://iam.example.com/v3").unwrap(),
            AuthCredentials::Token(SecretString::from("t".to_owned())),
            ProjectScope::Id("p1".into()),
            "eu-de",
        )
    }

    #[test]
    fn token_credentials_carry_scope() {
        let creds = config().credentials();
        assert!(matches!(
            creds,
            Credentials::Token { ref project, .. } if *project == ProjectScope::Id("p1".into())
        ));
        assert_eq!(creds.auth_url().as_str(), "https://iam.example.com/v3");
    }

    #[test]
    fn unconfigured_service_has_empty_options() {
        let mut cfg = config();
        cfg.services.insert(
            "apig".into(),
            ServiceOptions {
                api_version: Some("2".into()),
                endpoint_override: None,
            },
        );
        assert_eq!(cfg.service_options("apig").api_version.as_deref(), Some("2"));
        assert_eq!(cfg.service_options("nat"), ServiceOptions::default());
    }

    #[test]
    fn tls_maps_onto_transport() {
        let mut cfg = config();
        cfg.tls = TlsVerification::DangerAcceptInvalid;
        assert!(matches!(cfg.transport().tls, TlsMode::DangerAcceptInvalid));
    }
}
