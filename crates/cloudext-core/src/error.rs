// ── Core error types ──
//
// User-facing errors from cloudext-core. Consumers never match on HTTP
// transport details; the `From<cloudext_api::Error>` impl folds them into
// the variants below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Resolution errors ────────────────────────────────────────────
    #[error("Service '{service}' is not available in region '{region}'")]
    ServiceNotSupported { service: String, region: String },

    /// The service resolved to a raw client only.
    #[error("{reason}")]
    Degraded { service: String, reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Service error code, e.g. `APIG.2012`.
        code: Option<String>,
        status: Option<u16>,
        request_id: Option<String>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cloudext_api::Error> for CoreError {
    fn from(err: cloudext_api::Error) -> Self {
        use cloudext_api::Error as E;

        match err {
            E::Authentication { message } => CoreError::AuthenticationFailed { message },
            E::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                        request_id: None,
                    }
                }
            }
            E::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            E::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            E::Http {
                status: 401,
                message,
                ..
            } => CoreError::AuthenticationFailed { message },
            E::Http {
                status: 404,
                message,
                ..
            } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            E::Http {
                status,
                message,
                code,
                request_id,
                ..
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
                request_id,
            },
            E::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            E::NotSupported { service, region } => {
                CoreError::ServiceNotSupported { service, region }
            }
            E::InvalidApiVersion { value } => CoreError::Config {
                message: format!("Invalid API version '{value}'"),
            },
            e @ (E::MissingUriParam { .. } | E::MissingId { .. } | E::InvalidArgument { .. }) => {
                CoreError::ValidationFailed {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudext_api::Error as ApiError;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: "boom".into(),
            code: Some("APIG.9999".into()),
            request_id: Some("req-1".into()),
            body: None,
        }
    }

    #[test]
    fn http_statuses_map_to_domain_variants() {
        assert!(matches!(
            CoreError::from(http(401)),
            CoreError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            CoreError::from(http(404)),
            CoreError::NotFound { .. }
        ));
        match CoreError::from(http(409)) {
            CoreError::Api {
                code,
                status,
                request_id,
                ..
            } => {
                assert_eq!(code.as_deref(), Some("APIG.9999"));
                assert_eq!(status, Some(409));
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn not_supported_names_the_service() {
        let err = CoreError::from(ApiError::NotSupported {
            service: "modelarts".into(),
            region: "eu-nl".into(),
        });
        assert_eq!(
            err.to_string(),
            "Service 'modelarts' is not available in region 'eu-nl'"
        );
    }

    #[test]
    fn request_shape_errors_are_validation() {
        let err = CoreError::from(ApiError::MissingId {
            resource: "load balancer",
        });
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }
}
