//! dbtjob CLI
//!
//! Resolves pipeline job ids into dbt model invocations. Logs go to stderr;
//! stdout carries only command output.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::ConnectionArgs;
use dbtjob_client::ResolverConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dbtjob")]
#[command(about = "Resolve pipeline jobs into dbt model invocations", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbtjob_cli=info,dbtjob_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ResolverConfig::from(cli.connection);

    handle_command(cli.command, &config).await
}
