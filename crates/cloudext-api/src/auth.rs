// Keystone v3 authentication
//
// `POST {auth_url}/auth/tokens` with a password or token identity. The token
// comes back in the `X-Subject-Token` header, the service catalog and project
// in the body.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::catalog::{CatalogEntry, ServiceCatalog};
use crate::error::Error;

const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Project the token is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectScope {
    Id(String),
    Name { name: String, domain_name: String },
}

impl ProjectScope {
    fn to_json(&self) -> Value {
        match self {
            Self::Id(id) => json!({ "project": { "id": id } }),
            Self::Name { name, domain_name } => json!({
                "project": { "name": name, "domain": { "name": domain_name } }
            }),
        }
    }
}

/// Credentials for authenticating against Keystone.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username + password in a user domain.
    Password {
        auth_url: Url,
        username: String,
        password: SecretString,
        user_domain_name: String,
        project: ProjectScope,
    },
    /// An existing token, re-scoped to a project.
    Token {
        auth_url: Url,
        token: SecretString,
        project: ProjectScope,
    },
}

impl Credentials {
    pub fn auth_url(&self) -> &Url {
        match self {
            Self::Password { auth_url, .. } | Self::Token { auth_url, .. } => auth_url,
        }
    }

    fn request_body(&self) -> Value {
        match self {
            Self::Password {
                username,
                password,
                user_domain_name,
                project,
                ..
            } => json!({
                "auth": {
                    "identity": {
                        "methods": ["password"],
                        "password": {
                            "user": {
                                "name": username,
                                "password": password.expose_secret(),
                                "domain": { "name": user_domain_name }
                            }
                        }
                    },
                    "scope": project.to_json()
                }
            }),
            Self::Token { token, project, .. } => json!({
                "auth": {
                    "identity": {
                        "methods": ["token"],
                        "token": { "id": token.expose_secret() }
                    },
                    "scope": project.to_json()
                }
            }),
        }
    }
}

/// A scoped token plus the catalog it was issued with.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub value: SecretString,
    pub expires_at: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
    pub catalog: ServiceCatalog,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Deserialize)]
struct TokenBody {
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    project: Option<TokenProject>,
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct TokenProject {
    id: String,
}

/// Build the token endpoint from an auth URL (`.../v3` → `.../v3/auth/tokens`).
fn tokens_url(auth_url: &Url) -> Result<Url, Error> {
    let base = auth_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/auth/tokens"))?)
}

/// Exchange credentials for a scoped token and the service catalog.
pub async fn authenticate(
    http: &reqwest::Client,
    credentials: &Credentials,
) -> Result<AuthToken, Error> {
    let url = tokens_url(credentials.auth_url())?;
    debug!("POST {url}");

    let resp = http
        .post(url)
        .json(&credentials.request_body())
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(Error::Authentication { message });
    }

    let token = resp
        .headers()
        .get(SUBJECT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| SecretString::from(v.to_owned()))
        .ok_or_else(|| Error::Authentication {
            message: format!("response carried no {SUBJECT_TOKEN_HEADER} header"),
        })?;

    let body = resp.text().await?;
    let parsed: TokenResponse =
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("token response: {e}"),
            body: body.clone(),
        })?;

    debug!(
        services = parsed.token.catalog.len(),
        "authenticated, catalog received"
    );

    Ok(AuthToken {
        value: token,
        expires_at: parsed.token.expires_at,
        project_id: parsed.token.project.map(|p| p.id),
        catalog: ServiceCatalog::new(parsed.token.catalog),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tokens_url_appends_path() {
        let url = Url::parse("https://iam.example.com/v3/").unwrap();
        assert_eq!(
            tokens_url(&url).unwrap().as_str(),
            "https://iam.example.com/v3/auth/tokens"
        );
    }

    #[test]
    fn password_body_scopes_by_name() {
        let creds = Credentials::Password {
            auth_url: Url::parse("https://iam.example.com/v3").unwrap(),
            username: "alice".into(),
            password: SecretString::from("s3cret".to_owned()),
            user_domain_name: "OTC0001".into(),
            project: ProjectScope::Name {
                name: "eu-de_demo".into(),
                domain_name: "OTC0001".into(),
            },
        };
        let body = creds.request_body();
        assert_eq!(body["auth"]["identity"]["methods"][0], "password");
        assert_eq!(
            body["auth"]["identity"]["password"]["user"]["password"],
            "s3cret"
        );
        assert_eq!(body["auth"]["scope"]["project"]["name"], "eu-de_demo");
    }

    #[test]
    fn token_body_scopes_by_id() {
        let creds = Credentials::Token {
            auth_url: Url::parse("https://iam.example.com/v3").unwrap(),
            token: SecretString::from("gAAAA".to_owned()),
            project: ProjectScope::Id("p-123".into()),
        };
        let body = creds.request_body();
        assert_eq!(body["auth"]["identity"]["token"]["id"], "gAAAA");
        assert_eq!(body["auth"]["scope"]["project"]["id"], "p-123");
    }
}
