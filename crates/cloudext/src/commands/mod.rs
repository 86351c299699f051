//! Command dispatch: bridges CLI args -> service proxies -> output formatting.

pub mod apigw;
pub mod config_cmd;
pub mod endpoints;
pub mod lb;
pub mod modelarts;
pub mod nat;
pub mod raw;
pub mod util;

use cloudext_core::Connection;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a connection-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    connection: &Connection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Apigw(args) => apigw::handle(connection, args, global).await,
        Command::Lb(args) => lb::handle(connection, args, global).await,
        Command::Nat(args) => nat::handle(connection, args, global).await,
        Command::Modelarts(args) => modelarts::handle(connection, args, global).await,
        Command::Endpoints(args) => endpoints::handle(connection, args, global).await,
        Command::Raw(args) => raw::handle(connection, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
