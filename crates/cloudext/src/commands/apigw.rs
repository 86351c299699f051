//! API Gateway command handlers.
//!
//! Everything below the instance level is scoped to one gateway, taken
//! from `--gateway` (or `CLOUDEXT_APIG_GATEWAY`).

use serde_json::json;
use tabled::Tabled;

use cloudext_core::services::apig::v2::ApigProxy;
use cloudext_core::services::apig::v2::models::{
    AclPolicy, Api, ApiGroup, ApiPublication, BackendApi, Environment, Gateway, SignBinding,
    Signature, ThrottleBoundApi, ThrottlingPolicy, ThrottlingPolicyBinding, VpcChannel,
    VpcChannelMember,
};
use cloudext_core::{Connection, ResourceRef};

use crate::cli::{
    ApigAclCommand, ApigApiCommand, ApigChannelCommand, ApigEnvCommand, ApigGroupCommand,
    ApigSignatureCommand, ApigThrottleCommand, ApigwArgs, ApigwCommand, GlobalOpts,
};
use crate::error::CliError;
use crate::output::{self, opt};

use super::util;

// ── Gateways ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct GatewayRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Spec")]
    spec: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Ingress")]
    ingress: String,
}

fn gateway_row(g: &Gateway, color: bool) -> GatewayRow {
    GatewayRow {
        id: opt(g.id.as_deref()),
        name: opt(g.instance_name.as_deref()),
        spec: opt(g.spec.as_deref()),
        status: output::status(g.status.as_deref().unwrap_or("-"), color),
        ingress: opt(g.eip_address.as_deref().or(g.ingress_ip.as_deref())),
    }
}

fn gateway_detail(g: &Gateway) -> String {
    output::detail(&[
        ("ID", opt(g.id.as_deref())),
        ("Name", opt(g.instance_name.as_deref())),
        ("Description", opt(g.description.as_deref())),
        ("Type", opt(g.gateway_type.as_deref())),
        ("Spec", opt(g.spec.as_deref())),
        ("Status", opt(g.status.as_deref())),
        ("VPC", opt(g.vpc_id.as_deref())),
        ("Subnet", opt(g.subnet_id.as_deref())),
        ("Public IP", opt(g.eip_address.as_deref())),
        ("Private Ingress", opt(g.ingress_ip.as_deref())),
        ("Created", opt(g.create_time)),
    ])
}

fn gateway_id(g: &Gateway) -> String {
    g.id.clone().unwrap_or_default()
}

// ── Groups ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Subdomain")]
    domain: String,
    #[tabled(rename = "Custom Domains")]
    custom_domains: usize,
    #[tabled(rename = "Registered")]
    registered: String,
}

fn group_row(g: &ApiGroup) -> GroupRow {
    GroupRow {
        id: opt(g.id.as_deref()),
        name: g.name.clone(),
        domain: opt(g.sl_domain.as_deref()),
        custom_domains: g.url_domains.len(),
        registered: opt(g.register_time.as_deref()),
    }
}

fn group_detail(g: &ApiGroup) -> String {
    let domains: Vec<&str> = g
        .url_domains
        .iter()
        .filter_map(|d| d.domain.as_deref())
        .collect();
    output::detail(&[
        ("ID", opt(g.id.as_deref())),
        ("Name", g.name.clone()),
        ("Description", opt(g.remark.as_deref())),
        ("Status", opt(g.status)),
        ("Subdomain", opt(g.sl_domain.as_deref())),
        (
            "Custom Domains",
            if domains.is_empty() { "-".into() } else { domains.join(", ") },
        ),
        ("Registered", opt(g.register_time.as_deref())),
        ("Updated", opt(g.update_time.as_deref())),
    ])
}

fn group_id(g: &ApiGroup) -> String {
    g.id.clone().unwrap_or_default()
}

// ── APIs ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApiRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Auth")]
    auth: String,
    #[tabled(rename = "Env")]
    env: String,
}

fn api_row(a: &Api) -> ApiRow {
    ApiRow {
        id: opt(a.id.as_deref()),
        name: a.name.clone(),
        method: a.req_method.clone(),
        path: a.req_uri.clone(),
        auth: a.auth_type.clone(),
        env: opt(a.run_env_name.as_deref()),
    }
}

fn api_detail(a: &Api) -> String {
    let backend = a.backend_api.as_ref().map(|b| {
        format!(
            "{} {}://{}{}",
            b.req_method,
            b.req_protocol.to_lowercase(),
            b.url_domain.as_deref().unwrap_or("-"),
            b.req_uri
        )
    });
    output::detail(&[
        ("ID", opt(a.id.as_deref())),
        ("Name", a.name.clone()),
        ("Group", opt(a.group_name.as_deref().or(Some(a.group_id.as_str())))),
        ("Visibility", if a.api_type == 2 { "private".into() } else { "public".into() }),
        ("Request", format!("{} {} {}", a.req_protocol, a.req_method, a.req_uri)),
        ("Auth", a.auth_type.clone()),
        ("Backend Type", a.backend_type.clone()),
        ("Backend", opt(backend)),
        ("Environment", opt(a.run_env_name.as_deref())),
        ("Publish ID", opt(a.publish_id.as_deref())),
        ("Description", opt(a.remark.as_deref())),
        ("Registered", opt(a.register_time.as_deref())),
    ])
}

fn api_id(a: &Api) -> String {
    a.id.clone().unwrap_or_default()
}

fn publication_detail(p: &ApiPublication) -> String {
    output::detail(&[
        ("API", opt(p.api_name.as_deref().or(p.api_id.as_deref()))),
        ("Environment", opt(p.env_id.as_deref())),
        ("Publish ID", opt(p.publish_id.as_deref())),
        ("Version", opt(p.version_id.as_deref())),
        ("Published", opt(p.publish_time.as_deref())),
        ("Note", opt(p.remark.as_deref())),
    ])
}

fn publication_id(p: &ApiPublication) -> String {
    p.publish_id.clone().unwrap_or_default()
}

/// Assemble an API from flags. Without a backend address the API answers
/// with an empty mock response.
#[allow(clippy::too_many_arguments)]
fn api_from_flags(
    name: String,
    group: String,
    path: String,
    method: String,
    protocol: String,
    auth_type: String,
    backend_address: Option<String>,
    backend_path: Option<String>,
    backend_timeout: i64,
) -> Api {
    let method = method.to_uppercase();
    let protocol = protocol.to_uppercase();
    let (backend_type, backend_api, mock_info) = match backend_address {
        Some(address) => (
            "HTTP",
            Some(BackendApi {
                req_protocol: if protocol == "HTTP" { "HTTP".into() } else { "HTTPS".into() },
                req_method: method.clone(),
                req_uri: backend_path.unwrap_or_else(|| path.clone()),
                url_domain: Some(address),
                timeout: Some(backend_timeout),
                ..BackendApi::default()
            }),
            None,
        ),
        None => ("MOCK", None, Some(json!({ "result_content": "" }))),
    };

    Api {
        name,
        group_id: group,
        api_type: 1,
        req_protocol: protocol,
        req_method: method,
        req_uri: path,
        auth_type: auth_type.to_uppercase(),
        backend_type: backend_type.into(),
        backend_api,
        mock_info,
        ..Api::default()
    }
}

// ── Environments ────────────────────────────────────────────────────

#[derive(Tabled)]
struct EnvRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    remark: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn env_row(e: &Environment) -> EnvRow {
    EnvRow {
        id: opt(e.id.as_deref()),
        name: e.name.clone(),
        remark: opt(e.remark.as_deref()),
        created: opt(e.create_time.as_deref()),
    }
}

fn env_detail(e: &Environment) -> String {
    output::detail(&[
        ("ID", opt(e.id.as_deref())),
        ("Name", e.name.clone()),
        ("Description", opt(e.remark.as_deref())),
        ("Created", opt(e.create_time.as_deref())),
    ])
}

fn env_id(e: &Environment) -> String {
    e.id.clone().unwrap_or_default()
}

// ── Signatures ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SignatureRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    sign_type: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Bound APIs")]
    bound: String,
}

fn signature_row(s: &Signature) -> SignatureRow {
    SignatureRow {
        id: opt(s.id.as_deref()),
        name: s.name.clone(),
        sign_type: opt(s.sign_type.as_deref()),
        key: opt(s.sign_key.as_deref()),
        bound: opt(s.bind_num),
    }
}

fn signature_detail(s: &Signature) -> String {
    output::detail(&[
        ("ID", opt(s.id.as_deref())),
        ("Name", s.name.clone()),
        ("Type", opt(s.sign_type.as_deref())),
        ("Algorithm", opt(s.sign_algorithm.as_deref())),
        ("Key", opt(s.sign_key.as_deref())),
        ("Secret", opt(s.sign_secret.as_deref())),
        ("Bound APIs", opt(s.bind_num)),
        ("Created", opt(s.create_time.as_deref())),
    ])
}

fn signature_id(s: &Signature) -> String {
    s.id.clone().unwrap_or_default()
}

#[derive(Tabled)]
struct SignBindingRow {
    #[tabled(rename = "Binding ID")]
    id: String,
    #[tabled(rename = "API")]
    api: String,
    #[tabled(rename = "Env")]
    env: String,
    #[tabled(rename = "Publish ID")]
    publish_id: String,
    #[tabled(rename = "Bound")]
    bound: String,
}

fn sign_binding_row(b: &SignBinding) -> SignBindingRow {
    SignBindingRow {
        id: opt(b.id.as_deref()),
        api: opt(b.api_name.as_deref().or(b.api_id.as_deref())),
        env: opt(b.env_name.as_deref()),
        publish_id: opt(b.publish_id.as_deref()),
        bound: opt(b.binding_time.as_deref()),
    }
}

fn sign_binding_id(b: &SignBinding) -> String {
    b.id.clone().unwrap_or_default()
}

// ── Throttling ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ThrottleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Bound APIs")]
    bound: String,
}

fn limit(p: &ThrottlingPolicy) -> String {
    format!(
        "{} / {} {}",
        p.api_call_limits,
        p.time_interval,
        p.time_unit.to_lowercase()
    )
}

fn throttle_row(p: &ThrottlingPolicy) -> ThrottleRow {
    ThrottleRow {
        id: opt(p.id.as_deref()),
        name: p.name.clone(),
        limit: limit(p),
        bound: opt(p.bind_num),
    }
}

fn throttle_detail(p: &ThrottlingPolicy) -> String {
    output::detail(&[
        ("ID", opt(p.id.as_deref())),
        ("Name", p.name.clone()),
        ("API Limit", limit(p)),
        ("User Limit", opt(p.user_call_limits)),
        ("App Limit", opt(p.app_call_limits)),
        ("IP Limit", opt(p.ip_call_limits)),
        ("Bound APIs", opt(p.bind_num)),
        ("Description", opt(p.remark.as_deref())),
        ("Created", opt(p.create_time.as_deref())),
    ])
}

fn throttle_id(p: &ThrottlingPolicy) -> String {
    p.id.clone().unwrap_or_default()
}

#[derive(Tabled)]
struct ThrottleBindingRow {
    #[tabled(rename = "Binding ID")]
    id: String,
    #[tabled(rename = "API")]
    api: String,
    #[tabled(rename = "Request")]
    request: String,
    #[tabled(rename = "Env")]
    env: String,
}

fn throttle_binding_row(b: &ThrottleBoundApi) -> ThrottleBindingRow {
    ThrottleBindingRow {
        id: opt(b.throttle_apply_id.as_deref()),
        api: opt(b.name.as_deref()),
        request: format!(
            "{} {}",
            b.req_method.as_deref().unwrap_or("-"),
            b.req_uri.as_deref().unwrap_or("-")
        ),
        env: opt(b.run_env_name.as_deref()),
    }
}

fn throttle_apply_detail(b: &ThrottlingPolicyBinding) -> String {
    let ids: Vec<String> = b
        .throttle_applys
        .iter()
        .map(|a| opt(a.id.as_deref()))
        .collect();
    output::detail(&[
        ("Policy", b.strategy_id.clone()),
        ("Bindings", ids.join(", ")),
    ])
}

fn throttle_binding_id(b: &ThrottleBoundApi) -> String {
    b.throttle_apply_id.clone().unwrap_or_default()
}

// ── ACLs / VPC channels ─────────────────────────────────────────────

#[derive(Tabled)]
struct AclRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    acl_type: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn acl_row(a: &AclPolicy) -> AclRow {
    AclRow {
        id: opt(a.id.as_deref()),
        name: a.acl_name.clone(),
        acl_type: a.acl_type.clone(),
        entity: a.entity_type.clone(),
        value: a.acl_value.clone(),
    }
}

fn acl_detail(a: &AclPolicy) -> String {
    output::detail(&[
        ("ID", opt(a.id.as_deref())),
        ("Name", a.acl_name.clone()),
        ("Type", a.acl_type.clone()),
        ("Entity", a.entity_type.clone()),
        ("Value", a.acl_value.clone()),
        ("Bound APIs", opt(a.bind_num)),
    ])
}

fn acl_id(a: &AclPolicy) -> String {
    a.id.clone().unwrap_or_default()
}

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Port")]
    port: i32,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Status")]
    status: String,
}

fn channel_row(c: &VpcChannel, color: bool) -> ChannelRow {
    ChannelRow {
        id: opt(c.id.as_deref()),
        name: c.name.clone(),
        port: c.port,
        members: c.members.len(),
        status: output::status(&opt(c.status), color),
    }
}

fn channel_detail(c: &VpcChannel) -> String {
    let members: Vec<String> = c
        .members
        .iter()
        .map(|m| {
            let target = m
                .host
                .as_deref()
                .or(m.ecs_name.as_deref())
                .or(m.ecs_id.as_deref())
                .unwrap_or("-");
            match m.weight {
                Some(w) => format!("{target} (weight {w})"),
                None => target.to_owned(),
            }
        })
        .collect();
    let strategy = match c.balance_strategy {
        1 => "weighted round robin",
        2 => "weighted least connections",
        3 => "source hashing",
        4 => "URI hashing",
        _ => "unknown",
    };
    output::detail(&[
        ("ID", opt(c.id.as_deref())),
        ("Name", c.name.clone()),
        ("Port", c.port.to_string()),
        ("Balancing", strategy.into()),
        ("Member Type", c.member_type.clone()),
        ("Members", if members.is_empty() { "-".into() } else { members.join(", ") }),
        ("Status", opt(c.status)),
        ("Created", opt(c.create_time.as_deref())),
    ])
}

fn channel_id(c: &VpcChannel) -> String {
    c.id.clone().unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    connection: &Connection,
    args: ApigwArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let apig = connection.apig().await?;
    let color = output::should_color(&global.color);

    match args.command {
        ApigwCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let gateways = apig.list_gateways(&query).await?;
            let out = output::render_list(
                &global.output,
                &gateways,
                |g| gateway_row(g, color),
                gateway_id,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApigwCommand::Show { id } => {
            let gateway = apig.get_gateway(ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &gateway, gateway_detail, gateway_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApigwCommand::Delete { id } => {
            if !util::confirm(&format!("Delete API gateway '{id}'?"), global.yes)? {
                return Ok(());
            }
            apig.delete_gateway(ResourceRef::Id(&id)).await?;
            if !global.quiet {
                eprintln!("API gateway '{id}' deleted");
            }
            Ok(())
        }

        ApigwCommand::Group(a) => handle_group(apig, &a.scope.gateway, a.command, global).await,
        ApigwCommand::Api(a) => handle_api(apig, &a.scope.gateway, a.command, global).await,
        ApigwCommand::Env(a) => handle_env(apig, &a.scope.gateway, a.command, global).await,
        ApigwCommand::Signature(a) => {
            handle_signature(apig, &a.scope.gateway, a.command, global).await
        }
        ApigwCommand::Throttle(a) => {
            handle_throttle(apig, &a.scope.gateway, a.command, global).await
        }
        ApigwCommand::Acl(a) => handle_acl(apig, &a.scope.gateway, a.command, global).await,
        ApigwCommand::Channel(a) => {
            handle_channel(apig, &a.scope.gateway, a.command, global, color).await
        }
    }
}

async fn find_group(apig: &ApigProxy, gw: &str, name_or_id: &str) -> Result<ApiGroup, CliError> {
    apig.find_api_group(gw, name_or_id)
        .await?
        .ok_or_else(|| util::not_found("API group", name_or_id, "apigw group list"))
}

async fn handle_group(
    apig: &ApigProxy,
    gw: &str,
    command: ApigGroupCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ApigGroupCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let groups = apig.list_api_groups(gw, &query).await?;
            let out = output::render_list(&global.output, &groups, group_row, group_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigGroupCommand::Show { group } => {
            let found = find_group(apig, gw, &group).await?;
            let out = output::render_single(&global.output, &found, group_detail, group_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigGroupCommand::Create { name, remark } => {
            let request = ApiGroup {
                name,
                remark,
                ..ApiGroup::default()
            };
            let created = apig.create_api_group(gw, &request).await?;
            let out = output::render_single(&global.output, &created, group_detail, group_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigGroupCommand::Set {
            group,
            name,
            remark,
        } => {
            let mut body = util::changes(vec![
                ("name", name.map(|v| json!(v))),
                ("remark", remark.map(|v| json!(v))),
            ])?;
            let found = find_group(apig, gw, &group).await?;
            // Updates replace the group, so the name is always sent.
            if let Some(fields) = body.as_object_mut() {
                fields
                    .entry("name")
                    .or_insert_with(|| json!(found.name));
            }
            let updated = apig
                .update_api_group(gw, ResourceRef::Instance(&found), &body)
                .await?;
            let out = output::render_single(&global.output, &updated, group_detail, group_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigGroupCommand::Delete { group } => {
            let found = find_group(apig, gw, &group).await?;
            if util::confirm(&format!("Delete API group '{group}'?"), global.yes)? {
                apig.delete_api_group(gw, ResourceRef::Instance(&found))
                    .await?;
                if !global.quiet {
                    eprintln!("API group '{group}' deleted");
                }
            }
        }
    }
    Ok(())
}

async fn handle_api(
    apig: &ApigProxy,
    gw: &str,
    command: ApigApiCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ApigApiCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let apis = apig.list_apis(gw, &query).await?;
            let out = output::render_list(&global.output, &apis, api_row, api_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigApiCommand::Show { id } => {
            let api = apig.get_api(gw, ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &api, api_detail, api_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigApiCommand::Create {
            from_file,
            name,
            group,
            path,
            method,
            protocol,
            auth_type,
            backend_address,
            backend_path,
            backend_timeout,
        } => {
            let request = match (from_file, name, group, path) {
                (Some(file), _, _, _) => util::read_json_file::<Api>(&file)?,
                (None, Some(name), Some(group), Some(path)) => api_from_flags(
                    name,
                    group,
                    path,
                    method,
                    protocol,
                    auth_type,
                    backend_address,
                    backend_path,
                    backend_timeout,
                ),
                _ => {
                    return Err(CliError::validation(
                        "name",
                        "--name, --group and --path are required without --from-file",
                    ));
                }
            };
            let created = apig.create_api(gw, &request).await?;
            let out = output::render_single(&global.output, &created, api_detail, api_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigApiCommand::Delete { id } => {
            if util::confirm(&format!("Delete API '{id}'?"), global.yes)? {
                apig.delete_api(gw, ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("API '{id}' deleted");
                }
            }
        }

        ApigApiCommand::Publish { id, env, remark } => {
            let publication = apig
                .publish_api(gw, ResourceRef::Id(&id), &env, remark.as_deref())
                .await?;
            let out = output::render_single(
                &global.output,
                &publication,
                publication_detail,
                publication_id,
            )?;
            output::print_output(&out, global.quiet);
        }

        ApigApiCommand::Offline { id, env } => {
            let prompt = format!("Take API '{id}' offline in environment '{env}'?");
            if util::confirm(&prompt, global.yes)? {
                apig.offline_api(gw, ResourceRef::Id(&id), &env).await?;
                if !global.quiet {
                    eprintln!("API '{id}' taken offline");
                }
            }
        }
    }
    Ok(())
}

async fn handle_env(
    apig: &ApigProxy,
    gw: &str,
    command: ApigEnvCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ApigEnvCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let envs = apig.list_environments(gw, &query).await?;
            let out = output::render_list(&global.output, &envs, env_row, env_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigEnvCommand::Create { name, remark } => {
            let request = Environment {
                name,
                remark,
                ..Environment::default()
            };
            let created = apig.create_environment(gw, &request).await?;
            let out = output::render_single(&global.output, &created, env_detail, env_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigEnvCommand::Delete { id } => {
            if util::confirm(&format!("Delete environment '{id}'?"), global.yes)? {
                apig.delete_environment(gw, ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("Environment '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}

async fn handle_signature(
    apig: &ApigProxy,
    gw: &str,
    command: ApigSignatureCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ApigSignatureCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let signatures = apig.list_signatures(gw, &query).await?;
            let out =
                output::render_list(&global.output, &signatures, signature_row, signature_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigSignatureCommand::Create {
            name,
            sign_type,
            key,
            secret,
        } => {
            let request = Signature {
                name,
                sign_type,
                sign_key: key,
                sign_secret: secret,
                ..Signature::default()
            };
            let created = apig.create_signature(gw, &request).await?;
            let out =
                output::render_single(&global.output, &created, signature_detail, signature_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigSignatureCommand::Delete { id } => {
            if util::confirm(&format!("Delete signature key '{id}'?"), global.yes)? {
                apig.delete_signature(gw, ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("Signature key '{id}' deleted");
                }
            }
        }

        ApigSignatureCommand::Bind { id, publish_ids } => {
            let result = apig
                .bind_signature(gw, ResourceRef::Id(&id), publish_ids)
                .await?;
            let out = output::render_list(
                &global.output,
                &result.bindings,
                sign_binding_row,
                sign_binding_id,
            )?;
            output::print_output(&out, global.quiet);
        }

        ApigSignatureCommand::Bindings { id } => {
            let bindings = apig
                .list_signature_bindings(gw, ResourceRef::Id(&id))
                .await?;
            let out = output::render_list(
                &global.output,
                &bindings,
                sign_binding_row,
                sign_binding_id,
            )?;
            output::print_output(&out, global.quiet);
        }

        ApigSignatureCommand::Unbind { binding } => {
            if util::confirm(&format!("Remove signature binding '{binding}'?"), global.yes)? {
                apig.unbind_signature(gw, &binding).await?;
                if !global.quiet {
                    eprintln!("Signature binding '{binding}' removed");
                }
            }
        }
    }
    Ok(())
}

async fn handle_throttle(
    apig: &ApigProxy,
    gw: &str,
    command: ApigThrottleCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ApigThrottleCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let policies = apig.list_throttling_policies(gw, &query).await?;
            let out = output::render_list(&global.output, &policies, throttle_row, throttle_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigThrottleCommand::Show { id } => {
            let policy = apig
                .get_throttling_policy(gw, ResourceRef::Id(&id))
                .await?;
            let out =
                output::render_single(&global.output, &policy, throttle_detail, throttle_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigThrottleCommand::Create {
            name,
            api_calls,
            interval,
            unit,
            user_calls,
            app_calls,
            ip_calls,
            remark,
        } => {
            if api_calls <= 0 || interval <= 0 {
                return Err(CliError::validation(
                    "api-calls",
                    "--api-calls and --interval must be positive",
                ));
            }
            let request = ThrottlingPolicy {
                name,
                api_call_limits: api_calls,
                time_interval: interval,
                time_unit: unit.to_uppercase(),
                user_call_limits: user_calls,
                app_call_limits: app_calls,
                ip_call_limits: ip_calls,
                remark,
                ..ThrottlingPolicy::default()
            };
            let created = apig.create_throttling_policy(gw, &request).await?;
            let out =
                output::render_single(&global.output, &created, throttle_detail, throttle_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigThrottleCommand::Delete { id } => {
            if util::confirm(&format!("Delete throttling policy '{id}'?"), global.yes)? {
                apig.delete_throttling_policy(gw, ResourceRef::Id(&id))
                    .await?;
                if !global.quiet {
                    eprintln!("Throttling policy '{id}' deleted");
                }
            }
        }

        ApigThrottleCommand::Bind { id, publish_ids } => {
            let result = apig
                .bind_throttling_policy(gw, ResourceRef::Id(&id), publish_ids)
                .await?;
            if !global.quiet {
                eprintln!(
                    "Throttling policy '{id}' applied to {} API(s)",
                    result.throttle_applys.len()
                );
            }
            let out = output::render_single(
                &global.output,
                &result,
                throttle_apply_detail,
                |r| r.strategy_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ApigThrottleCommand::Bindings { id } => {
            let bound = apig
                .list_throttling_policy_bindings(gw, ResourceRef::Id(&id))
                .await?;
            let out = output::render_list(
                &global.output,
                &bound,
                throttle_binding_row,
                throttle_binding_id,
            )?;
            output::print_output(&out, global.quiet);
        }

        ApigThrottleCommand::Unbind { bindings } => {
            let prompt = format!("Remove {} throttling binding(s)?", bindings.len());
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            if let [binding] = bindings.as_slice() {
                apig.unbind_throttling_policy(gw, binding).await?;
                if !global.quiet {
                    eprintln!("Throttling binding '{binding}' removed");
                }
            } else {
                let result = apig.unbind_throttling_policies(gw, &bindings).await?;
                if !global.quiet {
                    eprintln!(
                        "Removed {} binding(s), {} failed",
                        result.success_throttles.len(),
                        result.failure.len()
                    );
                }
                if !result.failure.is_empty() {
                    let out = output::render_single(
                        &global.output,
                        &result.failure,
                        |f| serde_json::to_string_pretty(f).unwrap_or_default(),
                        |f| format!("{} failed", f.len()),
                    )?;
                    output::print_output(&out, global.quiet);
                }
            }
        }
    }
    Ok(())
}

async fn handle_acl(
    apig: &ApigProxy,
    gw: &str,
    command: ApigAclCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ApigAclCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let policies = apig.list_acl_policies(gw, &query).await?;
            let out = output::render_list(&global.output, &policies, acl_row, acl_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigAclCommand::Create {
            name,
            acl_type,
            value,
            entity_type,
        } => {
            let request = AclPolicy {
                acl_name: name,
                acl_type: acl_type.to_uppercase(),
                acl_value: value,
                entity_type: entity_type.to_uppercase(),
                ..AclPolicy::default()
            };
            let created = apig.create_acl_policy(gw, &request).await?;
            let out = output::render_single(&global.output, &created, acl_detail, acl_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigAclCommand::Delete { id } => {
            if util::confirm(&format!("Delete ACL policy '{id}'?"), global.yes)? {
                apig.delete_acl_policy(gw, ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("ACL policy '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}

async fn handle_channel(
    apig: &ApigProxy,
    gw: &str,
    command: ApigChannelCommand,
    global: &GlobalOpts,
    color: bool,
) -> Result<(), CliError> {
    match command {
        ApigChannelCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let channels = apig.list_vpc_channels(gw, &query).await?;
            let out = output::render_list(
                &global.output,
                &channels,
                |c| channel_row(c, color),
                channel_id,
            )?;
            output::print_output(&out, global.quiet);
        }

        ApigChannelCommand::Show { id } => {
            let channel = apig.get_vpc_channel(gw, ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &channel, channel_detail, channel_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigChannelCommand::Create {
            from_file,
            name,
            port,
            member,
        } => {
            let request = match (from_file, name, port) {
                (Some(file), _, _) => util::read_json_file::<VpcChannel>(&file)?,
                (None, Some(name), Some(port)) => VpcChannel {
                    name,
                    port,
                    balance_strategy: 1,
                    member_type: "ip".into(),
                    channel_type: 2,
                    members: member
                        .into_iter()
                        .map(|host| VpcChannelMember {
                            host: Some(host),
                            weight: Some(1),
                            ..VpcChannelMember::default()
                        })
                        .collect(),
                    ..VpcChannel::default()
                },
                _ => {
                    return Err(CliError::validation(
                        "name",
                        "--name and --port are required without --from-file",
                    ));
                }
            };
            let created = apig.create_vpc_channel(gw, &request).await?;
            let out = output::render_single(&global.output, &created, channel_detail, channel_id)?;
            output::print_output(&out, global.quiet);
        }

        ApigChannelCommand::Delete { id } => {
            if util::confirm(&format!("Delete VPC channel '{id}'?"), global.yes)? {
                apig.delete_vpc_channel(gw, ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("VPC channel '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}
