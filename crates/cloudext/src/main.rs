mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::io::Write;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cloudext_core::Connection;

use crate::cli::{Cli, Command, CompletionsArgs};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = u8::try_from(err.exit_code()).unwrap_or(1);
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}

/// `-v` steps warn → info → debug → trace; `RUST_LOG` wins when set.
fn init_tracing(verbosity: u8) {
    let level = ["warn", "info", "debug", "trace"][usize::from(verbosity.min(3))];
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, &global),
        Command::Completions(args) => write_completions(&args),
        cmd => {
            // Authentication is deferred until a service is first used.
            let connection = Connection::new(config::build_connection_config(&global)?);
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &connection, &global).await
        }
    }
}

fn write_completions(args: &CompletionsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    clap_complete::generate(args.shell, &mut Cli::command(), "cloudext", &mut stdout);
    stdout.flush()?;
    Ok(())
}
