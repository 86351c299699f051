//! NAT gateway command handlers.

use serde_json::json;
use tabled::Tabled;

use cloudext_core::services::nat::v2::NatProxy;
use cloudext_core::services::nat::v2::models::{DnatRule, NatGateway, SnatRule};
use cloudext_core::{Connection, ResourceRef};

use crate::cli::{GlobalOpts, NatArgs, NatCommand, NatDnatCommand, NatSnatCommand};
use crate::error::CliError;
use crate::output::{self, opt};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

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
    #[tabled(rename = "Router")]
    router: String,
}

fn gateway_row(g: &NatGateway, color: bool) -> GatewayRow {
    GatewayRow {
        id: opt(g.id.as_deref()),
        name: opt(g.name.as_deref()),
        spec: opt(g.spec.as_deref()),
        status: output::status(g.status.as_deref().unwrap_or("-"), color),
        router: opt(g.router_id.as_deref()),
    }
}

fn gateway_detail(g: &NatGateway) -> String {
    output::detail(&[
        ("ID", opt(g.id.as_deref())),
        ("Name", opt(g.name.as_deref())),
        ("Description", opt(g.description.as_deref())),
        ("Spec", opt(g.spec.as_deref())),
        ("Status", opt(g.status.as_deref())),
        ("Admin Up", opt(g.admin_state_up)),
        ("Router", opt(g.router_id.as_deref())),
        ("Network", opt(g.internal_network_id.as_deref())),
        ("Created", opt(g.created_at.as_deref())),
    ])
}

#[derive(Tabled)]
struct SnatRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Gateway")]
    gateway: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Floating IP")]
    floating_ip: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn snat_row(r: &SnatRule, color: bool) -> SnatRow {
    SnatRow {
        id: opt(r.id.as_deref()),
        gateway: opt(r.nat_gateway_id.as_deref()),
        source: opt(r.cidr.as_deref().or(r.network_id.as_deref())),
        floating_ip: opt(r.floating_ip_address.as_deref()),
        status: output::status(r.status.as_deref().unwrap_or("-"), color),
    }
}

fn snat_detail(r: &SnatRule) -> String {
    output::detail(&[
        ("ID", opt(r.id.as_deref())),
        ("Gateway", opt(r.nat_gateway_id.as_deref())),
        ("Network", opt(r.network_id.as_deref())),
        ("CIDR", opt(r.cidr.as_deref())),
        ("Source Type", opt(r.source_type)),
        ("Floating IP", opt(r.floating_ip_address.as_deref())),
        ("Floating IP ID", opt(r.floating_ip_id.as_deref())),
        ("Status", opt(r.status.as_deref())),
        ("Created", opt(r.created_at.as_deref())),
    ])
}

#[derive(Tabled)]
struct DnatRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "External")]
    external: String,
    #[tabled(rename = "Internal")]
    internal: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn dnat_row(r: &DnatRule, color: bool) -> DnatRow {
    DnatRow {
        id: opt(r.id.as_deref()),
        protocol: opt(r.protocol.as_deref()),
        external: format!(
            "{}:{}",
            r.floating_ip_address.as_deref().unwrap_or("-"),
            opt(r.external_service_port)
        ),
        internal: format!(
            "{}:{}",
            r.private_ip.as_deref().or(r.port_id.as_deref()).unwrap_or("-"),
            opt(r.internal_service_port)
        ),
        status: output::status(r.status.as_deref().unwrap_or("-"), color),
    }
}

fn dnat_detail(r: &DnatRule) -> String {
    output::detail(&[
        ("ID", opt(r.id.as_deref())),
        ("Gateway", opt(r.nat_gateway_id.as_deref())),
        ("Protocol", opt(r.protocol.as_deref())),
        ("Floating IP", opt(r.floating_ip_address.as_deref())),
        ("External Port", opt(r.external_service_port)),
        ("Private IP", opt(r.private_ip.as_deref())),
        ("Port ID", opt(r.port_id.as_deref())),
        ("Internal Port", opt(r.internal_service_port)),
        ("Status", opt(r.status.as_deref())),
        ("Created", opt(r.created_at.as_deref())),
    ])
}

fn id_of(id: Option<&String>) -> String {
    id.cloned().unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    connection: &Connection,
    args: NatArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let nat = connection.nat().await?;
    let color = output::should_color(&global.color);

    match args.command {
        NatCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let gateways = nat.list_gateways(&query).await?;
            let out = output::render_list(
                &global.output,
                &gateways,
                |g| gateway_row(g, color),
                |g| id_of(g.id.as_ref()),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NatCommand::Show { gateway } => {
            let found = find_gateway(nat, &gateway).await?;
            let out = output::render_single(&global.output, &found, gateway_detail, |g| {
                id_of(g.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NatCommand::Create {
            name,
            spec,
            router,
            network,
            description,
        } => {
            let request = NatGateway {
                name: Some(name),
                spec: Some(spec),
                router_id: Some(router),
                internal_network_id: Some(network),
                description,
                ..NatGateway::default()
            };
            let created = nat.create_gateway(&request).await?;
            let out = output::render_single(&global.output, &created, gateway_detail, |g| {
                id_of(g.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NatCommand::Set {
            gateway,
            name,
            spec,
            description,
        } => {
            let body = util::changes(vec![
                ("name", name.map(|v| json!(v))),
                ("spec", spec.map(|v| json!(v))),
                ("description", description.map(|v| json!(v))),
            ])?;
            let found = find_gateway(nat, &gateway).await?;
            let updated = nat
                .update_gateway(ResourceRef::Instance(&found), &body)
                .await?;
            let out = output::render_single(&global.output, &updated, gateway_detail, |g| {
                id_of(g.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NatCommand::Delete { gateway } => {
            let found = find_gateway(nat, &gateway).await?;
            if !util::confirm(&format!("Delete NAT gateway '{gateway}'?"), global.yes)? {
                return Ok(());
            }
            nat.delete_gateway(ResourceRef::Instance(&found)).await?;
            if !global.quiet {
                eprintln!("NAT gateway '{gateway}' deleted");
            }
            Ok(())
        }

        NatCommand::Snat(snat) => handle_snat(nat, snat.command, global, color).await,
        NatCommand::Dnat(dnat) => handle_dnat(nat, dnat.command, global, color).await,
    }
}

async fn find_gateway(nat: &NatProxy, name_or_id: &str) -> Result<NatGateway, CliError> {
    nat.find_gateway(name_or_id)
        .await?
        .ok_or_else(|| util::not_found("NAT gateway", name_or_id, "nat list"))
}

async fn handle_snat(
    nat: &NatProxy,
    command: NatSnatCommand,
    global: &GlobalOpts,
    color: bool,
) -> Result<(), CliError> {
    match command {
        NatSnatCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let rules = nat.list_snat_rules(&query).await?;
            let out = output::render_list(
                &global.output,
                &rules,
                |r| snat_row(r, color),
                |r| id_of(r.id.as_ref()),
            )?;
            output::print_output(&out, global.quiet);
        }

        NatSnatCommand::Show { id } => {
            let rule = nat.get_snat_rule(ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &rule, snat_detail, |r| {
                id_of(r.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
        }

        NatSnatCommand::Create {
            gateway,
            floating_ip,
            network,
            cidr,
        } => {
            let request = SnatRule {
                nat_gateway_id: Some(gateway),
                floating_ip_id: Some(floating_ip),
                network_id: network,
                cidr,
                ..SnatRule::default()
            };
            let created = nat.create_snat_rule(&request).await?;
            let out = output::render_single(&global.output, &created, snat_detail, |r| {
                id_of(r.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
        }

        NatSnatCommand::Delete { id } => {
            if util::confirm(&format!("Delete SNAT rule '{id}'?"), global.yes)? {
                nat.delete_snat_rule(ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("SNAT rule '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}

async fn handle_dnat(
    nat: &NatProxy,
    command: NatDnatCommand,
    global: &GlobalOpts,
    color: bool,
) -> Result<(), CliError> {
    match command {
        NatDnatCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let rules = nat.list_dnat_rules(&query).await?;
            let out = output::render_list(
                &global.output,
                &rules,
                |r| dnat_row(r, color),
                |r| id_of(r.id.as_ref()),
            )?;
            output::print_output(&out, global.quiet);
        }

        NatDnatCommand::Show { id } => {
            let rule = nat.get_dnat_rule(ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &rule, dnat_detail, |r| {
                id_of(r.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
        }

        NatDnatCommand::Create {
            gateway,
            floating_ip,
            protocol,
            port_id,
            private_ip,
            internal_port,
            external_port,
        } => {
            let request = DnatRule {
                nat_gateway_id: Some(gateway),
                floating_ip_id: Some(floating_ip),
                protocol: Some(protocol),
                port_id,
                private_ip,
                internal_service_port: Some(internal_port),
                external_service_port: Some(external_port),
                ..DnatRule::default()
            };
            let created = nat.create_dnat_rule(&request).await?;
            let out = output::render_single(&global.output, &created, dnat_detail, |r| {
                id_of(r.id.as_ref())
            })?;
            output::print_output(&out, global.quiet);
        }

        NatDnatCommand::Delete { id } => {
            if util::confirm(&format!("Delete DNAT rule '{id}'?"), global.yes)? {
                nat.delete_dnat_rule(ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("DNAT rule '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}
