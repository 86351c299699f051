//! Dedicated load balancer command handlers.

use serde_json::json;
use tabled::Tabled;

use cloudext_core::services::vlb::v3::VlbProxy;
use cloudext_core::services::vlb::v3::models::{Listener, LoadBalancer, Member, Pool};
use cloudext_core::{Connection, ResourceRef};

use crate::cli::{
    GlobalOpts, LbArgs, LbCommand, LbListenerCommand, LbMemberArgs, LbMemberCommand,
    LbPoolCommand,
};
use crate::error::CliError;
use crate::output::{self, opt};

use super::util;

// ── Load balancers ──────────────────────────────────────────────────

#[derive(Tabled)]
struct LoadBalancerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "VIP")]
    vip: String,
    #[tabled(rename = "Public IP")]
    eip: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl LoadBalancerRow {
    fn new(lb: &LoadBalancer, color: bool) -> Self {
        Self {
            id: opt(lb.id.as_deref()),
            name: opt(lb.name.as_deref()),
            vip: opt(lb.vip_address.as_deref()),
            eip: opt(lb.eips.first().and_then(|e| e.eip_address.as_deref())),
            status: output::status(lb.provisioning_status.as_deref().unwrap_or("-"), color),
        }
    }
}

fn load_balancer_detail(lb: &LoadBalancer) -> String {
    let eips: Vec<&str> = lb.eips.iter().filter_map(|e| e.eip_address.as_deref()).collect();
    output::detail(&[
        ("ID", opt(lb.id.as_deref())),
        ("Name", opt(lb.name.as_deref())),
        ("Description", opt(lb.description.as_deref())),
        ("VPC", opt(lb.vpc_id.as_deref())),
        ("Zones", lb.availability_zone_list.join(", ")),
        ("VIP", opt(lb.vip_address.as_deref())),
        ("VIP Subnet", opt(lb.vip_subnet_cidr_id.as_deref())),
        ("Public IPs", if eips.is_empty() { "-".into() } else { eips.join(", ") }),
        ("Provisioning", opt(lb.provisioning_status.as_deref())),
        ("Operating", opt(lb.operating_status.as_deref())),
        ("Protected", opt(lb.deletion_protection_enable)),
        ("Listeners", lb.listeners.len().to_string()),
        ("Pools", lb.pools.len().to_string()),
        ("Created", opt(lb.created_at.as_deref())),
    ])
}

fn lb_id(lb: &LoadBalancer) -> String {
    lb.id.clone().unwrap_or_default()
}

// ── Listeners ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ListenerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Default Pool")]
    default_pool: String,
}

fn listener_row(l: &Listener) -> ListenerRow {
    ListenerRow {
        id: opt(l.id.as_deref()),
        name: opt(l.name.as_deref()),
        protocol: opt(l.protocol.as_deref()),
        port: opt(l.protocol_port),
        default_pool: opt(l.default_pool_id.as_deref()),
    }
}

fn listener_detail(l: &Listener) -> String {
    let lb = l
        .loadbalancer_id
        .clone()
        .or_else(|| l.loadbalancers.first().map(|r| r.id.clone()));
    output::detail(&[
        ("ID", opt(l.id.as_deref())),
        ("Name", opt(l.name.as_deref())),
        ("Description", opt(l.description.as_deref())),
        ("Protocol", opt(l.protocol.as_deref())),
        ("Port", opt(l.protocol_port)),
        ("Load Balancer", opt(lb)),
        ("Default Pool", opt(l.default_pool_id.as_deref())),
        ("Keepalive", opt(l.keepalive_timeout)),
        ("Created", opt(l.created_at.as_deref())),
    ])
}

// ── Pools / members ─────────────────────────────────────────────────

#[derive(Tabled)]
struct PoolRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Algorithm")]
    algorithm: String,
    #[tabled(rename = "Members")]
    members: usize,
}

fn pool_row(p: &Pool) -> PoolRow {
    PoolRow {
        id: opt(p.id.as_deref()),
        name: opt(p.name.as_deref()),
        protocol: opt(p.protocol.as_deref()),
        algorithm: opt(p.lb_algorithm.as_deref()),
        members: p.members.len(),
    }
}

fn pool_detail(p: &Pool) -> String {
    output::detail(&[
        ("ID", opt(p.id.as_deref())),
        ("Name", opt(p.name.as_deref())),
        ("Description", opt(p.description.as_deref())),
        ("Protocol", opt(p.protocol.as_deref())),
        ("Algorithm", opt(p.lb_algorithm.as_deref())),
        ("Load Balancer", opt(p.loadbalancer_id.as_deref())),
        ("Listener", opt(p.listener_id.as_deref())),
        (
            "Persistence",
            opt(p.session_persistence.as_ref().map(|s| s.persistence_type.as_str())),
        ),
        ("Health Monitor", opt(p.healthmonitor_id.as_deref())),
        ("Members", p.members.len().to_string()),
    ])
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn member_row(m: &Member, color: bool) -> MemberRow {
    MemberRow {
        id: opt(m.id.as_deref()),
        name: opt(m.name.as_deref()),
        address: format!("{}:{}", m.address, m.protocol_port),
        weight: opt(m.weight),
        status: output::status(m.operating_status.as_deref().unwrap_or("-"), color),
    }
}

fn member_detail(m: &Member) -> String {
    output::detail(&[
        ("ID", opt(m.id.as_deref())),
        ("Name", opt(m.name.as_deref())),
        ("Address", m.address.clone()),
        ("Port", m.protocol_port.to_string()),
        ("Subnet", opt(m.subnet_cidr_id.as_deref())),
        ("Weight", opt(m.weight)),
        ("Status", opt(m.operating_status.as_deref())),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    connection: &Connection,
    args: LbArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let vlb = connection.vlb().await?;
    let color = output::should_color(&global.color);

    match args.command {
        LbCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let lbs = vlb.list_load_balancers(&query).await?;
            let out = output::render_list(
                &global.output,
                &lbs,
                |lb| LoadBalancerRow::new(lb, color),
                lb_id,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LbCommand::Show { lb } => {
            let found = find_load_balancer(vlb, &lb).await?;
            let out = output::render_single(&global.output, &found, load_balancer_detail, lb_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LbCommand::Create {
            from_file,
            name,
            vpc,
            az,
            subnet,
            l4_flavor,
            l7_flavor,
            description,
        } => {
            let request = if let Some(ref path) = from_file {
                util::read_json_file::<LoadBalancer>(path)?
            } else {
                LoadBalancer {
                    name,
                    vpc_id: vpc,
                    availability_zone_list: az,
                    vip_subnet_cidr_id: subnet,
                    l4_flavor_id: l4_flavor,
                    l7_flavor_id: l7_flavor,
                    description,
                    ..LoadBalancer::default()
                }
            };
            let created = vlb.create_load_balancer(&request).await?;
            let out = output::render_single(&global.output, &created, load_balancer_detail, lb_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LbCommand::Set {
            lb,
            name,
            description,
            deletion_protection,
        } => {
            let body = util::changes(vec![
                ("name", name.map(|v| json!(v))),
                ("description", description.map(|v| json!(v))),
                (
                    "deletion_protection_enable",
                    deletion_protection.map(|v| json!(v)),
                ),
            ])?;
            let found = find_load_balancer(vlb, &lb).await?;
            let updated = vlb
                .update_load_balancer(ResourceRef::Instance(&found), &body)
                .await?;
            let out = output::render_single(&global.output, &updated, load_balancer_detail, lb_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LbCommand::Delete { lb } => {
            let found = find_load_balancer(vlb, &lb).await?;
            if !util::confirm(&format!("Delete load balancer '{lb}'?"), global.yes)? {
                return Ok(());
            }
            vlb.delete_load_balancer(ResourceRef::Instance(&found))
                .await?;
            if !global.quiet {
                eprintln!("Load balancer '{lb}' deleted");
            }
            Ok(())
        }

        LbCommand::Listener(listener) => handle_listener(vlb, listener.command, global).await,
        LbCommand::Pool(pool) => handle_pool(vlb, pool.command, global).await,
        LbCommand::Member(member) => handle_member(vlb, member, global, color).await,
    }
}

async fn find_load_balancer(vlb: &VlbProxy, name_or_id: &str) -> Result<LoadBalancer, CliError> {
    vlb.find_load_balancer(name_or_id)
        .await?
        .ok_or_else(|| util::not_found("Load balancer", name_or_id, "lb list"))
}

async fn handle_listener(
    vlb: &VlbProxy,
    command: LbListenerCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id_fn = |l: &Listener| l.id.clone().unwrap_or_default();
    match command {
        LbListenerCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let listeners = vlb.list_listeners(&query).await?;
            let out = output::render_list(&global.output, &listeners, listener_row, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbListenerCommand::Show { id } => {
            let listener = vlb.get_listener(ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &listener, listener_detail, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbListenerCommand::Create {
            lb,
            protocol,
            port,
            name,
            default_pool,
        } => {
            let request = Listener {
                loadbalancer_id: Some(lb),
                protocol: Some(protocol.to_uppercase()),
                protocol_port: Some(port),
                name,
                default_pool_id: default_pool,
                ..Listener::default()
            };
            let created = vlb.create_listener(&request).await?;
            let out = output::render_single(&global.output, &created, listener_detail, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbListenerCommand::Delete { id } => {
            if util::confirm(&format!("Delete listener '{id}'?"), global.yes)? {
                vlb.delete_listener(ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("Listener '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}

async fn handle_pool(
    vlb: &VlbProxy,
    command: LbPoolCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id_fn = |p: &Pool| p.id.clone().unwrap_or_default();
    match command {
        LbPoolCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let pools = vlb.list_pools(&query).await?;
            let out = output::render_list(&global.output, &pools, pool_row, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbPoolCommand::Show { id } => {
            let pool = vlb.get_pool(ResourceRef::Id(&id)).await?;
            let out = output::render_single(&global.output, &pool, pool_detail, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbPoolCommand::Create {
            protocol,
            algorithm,
            lb,
            listener,
            name,
        } => {
            if lb.is_none() && listener.is_none() {
                return Err(CliError::validation(
                    "lb",
                    "a pool must be attached to --lb or --listener",
                ));
            }
            let request = Pool {
                protocol: Some(protocol.to_uppercase()),
                lb_algorithm: Some(algorithm.to_uppercase()),
                loadbalancer_id: lb,
                listener_id: listener,
                name,
                ..Pool::default()
            };
            let created = vlb.create_pool(&request).await?;
            let out = output::render_single(&global.output, &created, pool_detail, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbPoolCommand::Delete { id } => {
            if util::confirm(&format!("Delete pool '{id}'?"), global.yes)? {
                vlb.delete_pool(ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("Pool '{id}' deleted");
                }
            }
        }
    }
    Ok(())
}

async fn handle_member(
    vlb: &VlbProxy,
    args: LbMemberArgs,
    global: &GlobalOpts,
    color: bool,
) -> Result<(), CliError> {
    let pool = ResourceRef::Id(&args.pool);
    let id_fn = |m: &Member| m.id.clone().unwrap_or_default();
    match args.command {
        LbMemberCommand::List(list) => {
            let query = util::parse_pairs("filter", &list.filter)?;
            let members = vlb.list_members(pool, &query).await?;
            let out = output::render_list(
                &global.output,
                &members,
                |m| member_row(m, color),
                id_fn,
            )?;
            output::print_output(&out, global.quiet);
        }
        LbMemberCommand::Add {
            address,
            port,
            subnet,
            weight,
            name,
        } => {
            let member = Member {
                address,
                protocol_port: port,
                subnet_cidr_id: subnet,
                weight,
                name,
                ..Member::default()
            };
            let added = vlb.add_member(pool, &member).await?;
            let out = output::render_single(&global.output, &added, member_detail, id_fn)?;
            output::print_output(&out, global.quiet);
        }
        LbMemberCommand::Remove { id } => {
            let prompt = format!("Remove member '{id}' from pool '{}'?", args.pool);
            if util::confirm(&prompt, global.yes)? {
                vlb.remove_member(pool, ResourceRef::Id(&id)).await?;
                if !global.quiet {
                    eprintln!("Member '{id}' removed");
                }
            }
        }
    }
    Ok(())
}
