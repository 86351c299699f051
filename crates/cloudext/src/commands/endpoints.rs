//! `cloudext endpoints`: how each service resolved on this connection.

use tabled::Tabled;

use cloudext_core::{Connection, Resolution, ServiceKind};

use crate::cli::{EndpointsArgs, GlobalOpts, ServiceArg};
use crate::error::CliError;
use crate::output::{self, opt};

#[derive(Tabled)]
struct ResolutionRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

fn resolution_row(r: &Resolution, color: bool) -> ResolutionRow {
    ResolutionRow {
        service: r.service.to_string(),
        status: output::status(&r.status.to_string(), color),
        version: opt(r.version),
        endpoint: opt(r.endpoint.as_ref()),
        reason: opt(r.reason.as_deref()),
    }
}

pub(super) fn service_kind(arg: ServiceArg) -> ServiceKind {
    match arg {
        ServiceArg::Apig => ServiceKind::Apig,
        ServiceArg::Vlb => ServiceKind::Vlb,
        ServiceArg::Nat => ServiceKind::Nat,
        ServiceArg::Modelarts => ServiceKind::Modelarts,
    }
}

pub async fn handle(
    connection: &Connection,
    args: EndpointsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let report = if args.services.is_empty() {
        connection.resolution_report().await?
    } else {
        let mut report = Vec::with_capacity(args.services.len());
        for arg in args.services {
            report.push(connection.resolution(service_kind(arg)).await?);
        }
        report
    };

    let out = output::render_list(
        &global.output,
        &report,
        |r| resolution_row(r, color),
        |r| r.service.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
