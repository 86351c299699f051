use serde_json::Value;
use thiserror::Error;

/// Top-level error type for the `cloudext-api` crate.
///
/// Covers authentication, transport, remote HTTP failures, catalog and
/// version resolution, and resource path construction. `cloudext-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Keystone rejected the credentials or returned no token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote API ──────────────────────────────────────────────────
    /// Non-2xx response, with the decoded server error payload.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
        request_id: Option<String>,
        body: Option<Value>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Endpoint / version resolution ───────────────────────────────
    /// Discovery found no API version this client can use.
    #[error("Service '{service}' is not supported in region '{region}': no usable API version found")]
    NotSupported { service: String, region: String },

    /// A configured API version string could not be parsed.
    #[error("Invalid API version '{value}'")]
    InvalidApiVersion { value: String },

    // ── Resources ───────────────────────────────────────────────────
    /// A `{placeholder}` in a path template had no value.
    #[error("Missing URI parameter '{name}' for path '{template}'")]
    MissingUriParam { name: String, template: String },

    /// An instance was passed where an identifier was needed, but it has no id.
    #[error("{resource} has no id")]
    MissingId { resource: &'static str },

    /// A request value the selected API version cannot express.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl Error {
    /// HTTP status code of a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the remote rejected our token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Authentication { .. }) || self.status() == Some(401)
    }

    /// Extract the service-specific error code (e.g. `APIG.3030`), if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
