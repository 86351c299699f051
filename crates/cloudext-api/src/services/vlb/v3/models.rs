// Dedicated load balancer (ELB v3) resource types

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Reference to another resource by id (`{"id": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}

/// An EIP bound to a load balancer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Eip {
    #[serde(default)]
    pub eip_id: Option<String>,
    #[serde(default)]
    pub eip_address: Option<String>,
    #[serde(default)]
    pub ip_version: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionPersistence {
    /// SOURCE_IP, HTTP_COOKIE or APP_COOKIE
    #[serde(rename = "type")]
    pub persistence_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence_timeout: Option<i32>,
}

// ── Load balancer ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadBalancer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zone_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_subnet_cidr_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_port_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elb_virsubnet_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l4_flavor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l7_flavor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_target_enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_protection_enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eips: Vec<Eip>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Resource for LoadBalancer {
    const NAME: &'static str = "load balancer";
    const BASE_PATH: &'static str = "elb/loadbalancers";
    const RESOURCE_KEY: Option<&'static str> = Some("loadbalancer");
    const RESOURCES_KEY: Option<&'static str> = Some("loadbalancers");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── Listener ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listener {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// TCP, UDP, HTTP or HTTPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_port: Option<i32>,
    /// Write-only: the load balancer to attach to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadbalancer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loadbalancers: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pool_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tls_container_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ca_tls_container_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sni_container_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http2_enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keepalive_timeout: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for Listener {
    const NAME: &'static str = "listener";
    const BASE_PATH: &'static str = "elb/listeners";
    const RESOURCE_KEY: Option<&'static str> = Some("listener");
    const RESOURCES_KEY: Option<&'static str> = Some("listeners");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── Pool ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ROUND_ROBIN, LEAST_CONNECTIONS or SOURCE_IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadbalancer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthmonitor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loadbalancers: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

impl Resource for Pool {
    const NAME: &'static str = "pool";
    const BASE_PATH: &'static str = "elb/pools";
    const RESOURCE_KEY: Option<&'static str> = Some("pool");
    const RESOURCES_KEY: Option<&'static str> = Some("pools");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── Member ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    pub protocol_port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_cidr_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
}

impl Resource for Member {
    const NAME: &'static str = "member";
    const BASE_PATH: &'static str = "elb/pools/{pool_id}/members";
    const RESOURCE_KEY: Option<&'static str> = Some("member");
    const RESOURCES_KEY: Option<&'static str> = Some("members");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}
