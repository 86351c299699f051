//! `cloudext raw`: send an arbitrary request through a service's client.
//!
//! Works for degraded services too, since only the client is needed.

use serde_json::Value;

use cloudext_core::{Connection, Method};

use crate::cli::{GlobalOpts, RawArgs};
use crate::error::CliError;
use crate::output;

use super::{endpoints, util};

fn parse_method(method: &str) -> Result<Method, CliError> {
    Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| CliError::validation("method", format!("invalid HTTP method '{method}'")))
}

pub async fn handle(
    connection: &Connection,
    args: RawArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let method = parse_method(&args.method)?;
    let query = util::parse_pairs("query", &args.query)?;

    let body: Option<Value> = match (args.data, args.from_file) {
        (Some(data), _) => Some(serde_json::from_str(&data).map_err(|e| {
            CliError::validation("data", format!("invalid JSON body: {e}"))
        })?),
        (None, Some(path)) => Some(util::read_json_file(&path)?),
        (None, None) => None,
    };

    let client = connection.raw_client(endpoints::service_kind(args.service)).await?;
    tracing::debug!(%method, endpoint = %client.endpoint(), path = %args.path, "raw request");

    let response = client
        .send_raw(method, &args.path, &query, body.as_ref())
        .await?;

    let out = output::render_single(
        &global.output,
        &response,
        |v| serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
        Value::to_string,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn methods_are_case_insensitive() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Patch").unwrap(), Method::PATCH);
    }

    #[test]
    fn garbage_method_is_rejected() {
        assert!(matches!(
            parse_method("NOT A METHOD"),
            Err(CliError::Validation { .. })
        ));
    }
}
