// cloudext-core: Connection management between cloudext-api and the CLI.

pub mod config;
pub mod connection;
pub mod error;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ConnectionConfig, TlsVerification};
pub use connection::{Connection, Resolution, ResolutionStatus, ServiceKind};
pub use error::CoreError;

// Re-export the API surface consumers work with.
pub use cloudext_api::services;
pub use cloudext_api::{
    ApiVersion, DegradedCapability, Error as ApiError, Interface, Method, ProjectScope,
    ProxyBinding, ResourceRef, ServiceClient, ServiceOptions,
};
