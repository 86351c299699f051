// cloudext-api: Async Rust client for OpenStack-compatible cloud extension services
//
// Keystone authentication and catalog, the endpoint/version resolver that
// binds service proxies, generic resource CRUD, and typed proxies for the
// API Gateway, dedicated load balancer, NAT gateway and ModelArts services.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod discovery;
pub mod envelope;
pub mod error;
pub mod proxy;
pub mod resource;
pub mod services;
pub mod session;
pub mod transport;

pub use auth::{AuthToken, Credentials, ProjectScope};
pub use catalog::{Interface, ServiceCatalog};
pub use client::ServiceClient;
pub use discovery::{ApiVersion, Discovery, EndpointData, VersionedAdapter};
pub use envelope::EnvelopeResource;
pub use error::Error;
pub use proxy::{
    DegradedCapability, Proxy, ProxyBinding, ServiceDescriptor, ServiceOptions, ServiceProxy,
    SupportedVersions,
};
pub use resource::{Resource, ResourceRef, UriParams};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::Method;
