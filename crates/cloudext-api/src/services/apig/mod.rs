// API Gateway service

pub mod v2;

use crate::discovery::ApiVersion;
use crate::proxy::{ServiceDescriptor, ServiceProxy, SupportedVersions};

pub const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    service_type: "apig",
    base_service: "apig",
    target_service: "apig",
    endpoint_path: Some("v2/{project_id}"),
};

pub fn service() -> ServiceProxy<v2::ApigProxy> {
    ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::single(ApiVersion::major(2), v2::ApigProxy::new),
    )
}
