// API Gateway v2 resource types
//
// Dedicated-gateway resources live under `apigw/instances/{gateway_id}/...`
// relative to the `/v2/{project_id}` endpoint. Most fields are optional
// because list and detail responses carry different subsets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::EnvelopeResource;
use crate::resource::Resource;

// ── Gateway ──────────────────────────────────────────────────────────

/// A dedicated gateway instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_status: Option<i32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub gateway_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_mode: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Gateway {
    const NAME: &'static str = "gateway";
    const BASE_PATH: &'static str = "apigw/instances";
    const RESOURCES_KEY: Option<&'static str> = Some("instances");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── API group ────────────────────────────────────────────────────────

/// A custom domain bound to an API group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlDomain {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub cname_status: Option<i32>,
    #[serde(default)]
    pub ssl_id: Option<String>,
    #[serde(default)]
    pub ssl_name: Option<String>,
    #[serde(default)]
    pub min_ssl_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// 1 = valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_sell_status: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub url_domains: Vec<UrlDomain>,
}

impl Resource for ApiGroup {
    const NAME: &'static str = "API group";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/api-groups";
    const RESOURCES_KEY: Option<&'static str> = Some("groups");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── API ──────────────────────────────────────────────────────────────

/// A frontend request parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReqParam {
    pub name: String,
    /// STRING or NUMBER
    #[serde(rename = "type")]
    pub param_type: String,
    /// PATH, QUERY or HEADER
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// HTTP backend of an API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendApi {
    pub req_protocol: String,
    pub req_method: String,
    pub req_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    /// 1 = routed through a VPC channel, 2 = direct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_channel_status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_channel_info: Option<VpcChannelRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VpcChannelRef {
    pub vpc_channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_channel_proxy_host: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Api {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub group_id: String,
    /// 1 = public, 2 = private
    #[serde(rename = "type")]
    pub api_type: i32,
    pub req_protocol: String,
    pub req_method: String,
    pub req_uri: String,
    /// NONE, APP, IAM or AUTHORIZER
    pub auth_type: String,
    /// HTTP, MOCK or FUNCTION
    pub backend_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_normal_sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_failure_sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_api: Option<BackendApi>,
    /// MOCK backends only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_info: Option<Value>,
    /// FUNCTION backends only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub req_params: Vec<ReqParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_env_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_env_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Resource for Api {
    const NAME: &'static str = "API";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/apis";
    const RESOURCES_KEY: Option<&'static str> = Some("apis");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// Publishing or taking an API offline in one environment.
#[derive(Debug, Clone, Serialize)]
pub struct ApiActionRequest {
    /// `online` or `offline`
    pub action: String,
    pub env_id: String,
    pub api_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Result of an online/offline action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiPublication {
    #[serde(default)]
    pub publish_id: Option<String>,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub api_name: Option<String>,
    #[serde(default)]
    pub env_id: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
}

// ── Environment ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

impl Resource for Environment {
    const NAME: &'static str = "environment";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/envs";
    const RESOURCES_KEY: Option<&'static str> = Some("envs");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── Signature key ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// hmac, basic, public_key or aes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_num: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Resource for Signature {
    const NAME: &'static str = "signature key";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/signs";
    const RESOURCES_KEY: Option<&'static str> = Some("signs");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// One API bound to a signature key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignBinding {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sign_id: Option<String>,
    #[serde(default)]
    pub sign_name: Option<String>,
    #[serde(default)]
    pub publish_id: Option<String>,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub api_name: Option<String>,
    #[serde(default)]
    pub api_type: Option<i32>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub env_id: Option<String>,
    #[serde(default)]
    pub env_name: Option<String>,
    #[serde(default)]
    pub binding_time: Option<String>,
}

impl Resource for SignBinding {
    const NAME: &'static str = "signature binding";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/sign-bindings/binded-apis";
    const RESOURCES_KEY: Option<&'static str> = Some("bindings");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// Bind one signature key to several published APIs.
///
/// The create response lists one `SignBinding` per API under `bindings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureBinding {
    pub sign_id: String,
    pub publish_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<SignBinding>,
}

impl Resource for SignatureBinding {
    const NAME: &'static str = "signature binding";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/sign-bindings";

    fn id(&self) -> Option<String> {
        None
    }
}

impl EnvelopeResource for SignatureBinding {
    type Item = SignBinding;
    const ENVELOPE_KEY: &'static str = "bindings";

    fn attach(&mut self, items: Vec<SignBinding>) {
        self.bindings = items;
    }
}

// ── Throttling policy ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottlingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub api_call_limits: i64,
    pub time_interval: i64,
    /// SECOND, MINUTE, HOUR or DAY
    pub time_unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_call_limits: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_call_limits: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_call_limits: Option<i64>,
    /// 1 = exclusive, 2 = shared
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_adaptive_control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_num: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

impl Resource for ThrottlingPolicy {
    const NAME: &'static str = "throttling policy";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/throttles";
    const RESOURCES_KEY: Option<&'static str> = Some("throttles");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// One API published with a throttling policy applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottleApply {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub publish_id: Option<String>,
    #[serde(default)]
    pub scope: Option<i32>,
    #[serde(default)]
    pub apply_time: Option<String>,
}

/// Bind one throttling policy to several published APIs.
///
/// The create response lists one `ThrottleApply` per API under
/// `throttle_applys`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottlingPolicyBinding {
    pub strategy_id: String,
    pub publish_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throttle_applys: Vec<ThrottleApply>,
}

impl Resource for ThrottlingPolicyBinding {
    const NAME: &'static str = "throttling policy binding";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/throttle-bindings";

    fn id(&self) -> Option<String> {
        None
    }
}

impl EnvelopeResource for ThrottlingPolicyBinding {
    type Item = ThrottleApply;
    const ENVELOPE_KEY: &'static str = "throttle_applys";

    fn attach(&mut self, items: Vec<ThrottleApply>) {
        self.throttle_applys = items;
    }
}

/// An API a throttling policy is bound to, as listed by `binded-apis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottleBoundApi {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub run_env_id: Option<String>,
    #[serde(default)]
    pub run_env_name: Option<String>,
    #[serde(default)]
    pub publish_id: Option<String>,
    #[serde(default)]
    pub throttle_apply_id: Option<String>,
    #[serde(default)]
    pub apply_time: Option<String>,
    #[serde(default)]
    pub req_method: Option<String>,
    #[serde(default)]
    pub req_uri: Option<String>,
}

impl Resource for ThrottleBoundApi {
    const NAME: &'static str = "throttling policy binding";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/throttle-bindings/binded-apis";
    const RESOURCES_KEY: Option<&'static str> = Some("apis");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// Outcome of a batch unbind, passed through as the server reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchUnbindResult {
    #[serde(default)]
    pub success_throttles: Vec<Value>,
    #[serde(default)]
    pub failure: Vec<Value>,
}

// ── ACL policy ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AclPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub acl_name: String,
    /// PERMIT or DENY
    pub acl_type: String,
    /// Comma-separated IPs, ranges or account names.
    pub acl_value: String,
    /// IP or DOMAIN
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_num: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Resource for AclPolicy {
    const NAME: &'static str = "ACL policy";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/acls";
    const RESOURCES_KEY: Option<&'static str> = Some("acls");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

// ── VPC channel ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VpcChannelMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecs_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecs_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VpcHealthConfig {
    /// TCP, HTTP or HTTPS
    pub protocol: String,
    pub threshold_normal: i32,
    pub threshold_abnormal: i32,
    pub time_interval: i32,
    pub timeout: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VpcChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub port: i32,
    /// 1 = WRR, 2 = WLC, 3 = SH, 4 = URI hashing
    pub balance_strategy: i32,
    /// `instance` or `ip`
    pub member_type: String,
    /// 1 = private network ELB (deprecated), 2 = fast channel
    #[serde(rename = "type")]
    pub channel_type: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<VpcChannelMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_health_config: Option<VpcHealthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

impl Resource for VpcChannel {
    const NAME: &'static str = "VPC channel";
    const BASE_PATH: &'static str = "apigw/instances/{gateway_id}/vpc-channels";
    const RESOURCES_KEY: Option<&'static str> = Some("vpc_channels");

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}
