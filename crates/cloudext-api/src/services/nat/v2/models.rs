// NAT gateway v2 resource types

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NatGateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// "1" (small) to "4" (extra-large)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for NatGateway {
    const NAME: &'static str = "NAT gateway";
    const BASE_PATH: &'static str = "nat_gateways";
    const RESOURCE_KEY: Option<&'static str> = Some("nat_gateway");
    const RESOURCES_KEY: Option<&'static str> = Some("nat_gateways");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnatRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway_id: Option<String>,
    /// Subnet the rule applies to (VPC scenario).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    /// CIDR the rule applies to (Direct Connect scenario).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    /// 0 = VPC, 1 = Direct Connect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for SnatRule {
    const NAME: &'static str = "SNAT rule";
    const BASE_PATH: &'static str = "snat_rules";
    const RESOURCE_KEY: Option<&'static str> = Some("snat_rule");
    const RESOURCES_KEY: Option<&'static str> = Some("snat_rules");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnatRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_service_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_service_port: Option<i32>,
    /// tcp, udp or any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for DnatRule {
    const NAME: &'static str = "DNAT rule";
    const BASE_PATH: &'static str = "dnat_rules";
    const RESOURCE_KEY: Option<&'static str> = Some("dnat_rule");
    const RESOURCES_KEY: Option<&'static str> = Some("dnat_rules");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}
