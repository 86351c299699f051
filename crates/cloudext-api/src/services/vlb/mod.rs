// Dedicated load balancer service
//
// The cloud publishes no catalog entry for the dedicated ELB; its endpoint
// is derived from the `vpc` entry by swapping the host label to `elb`.

pub mod v3;

use crate::discovery::ApiVersion;
use crate::proxy::{ServiceDescriptor, ServiceProxy, SupportedVersions};

pub const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    service_type: "vlb",
    base_service: "vpc",
    target_service: "elb",
    endpoint_path: Some("v3/{project_id}"),
};

pub fn service() -> ServiceProxy<v3::VlbProxy> {
    ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::single(ApiVersion::major(3), v3::VlbProxy::new),
    )
}
