// NAT gateway service

pub mod v2;

use crate::discovery::ApiVersion;
use crate::proxy::{ServiceDescriptor, ServiceProxy, SupportedVersions};

pub const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    service_type: "nat",
    base_service: "nat",
    target_service: "nat",
    endpoint_path: Some("v2/{project_id}"),
};

pub fn service() -> ServiceProxy<v2::NatProxy> {
    ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::single(ApiVersion::major(2), v2::NatProxy::new),
    )
}
