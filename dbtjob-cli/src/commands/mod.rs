//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod taxonomy;

pub use taxonomy::TaxonomyCommands;

use anyhow::Result;
use clap::Subcommand;
use dbtjob_client::ResolverConfig;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the dbt selector and vars for a job
    Resolve {
        /// Pipeline job id (e.g. teamA/pipeline1)
        job_id: String,
    },
    /// Print the dbt model a job builds
    Model {
        /// Pipeline job id
        job_id: String,

        /// Also print the merged job config
        #[arg(long)]
        show_config: bool,
    },
    /// Pipeline platform taxonomy
    Taxonomy {
        #[command(subcommand)]
        command: TaxonomyCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The resolver configuration
pub async fn handle_command(command: Commands, config: &ResolverConfig) -> Result<()> {
    match command {
        Commands::Resolve { job_id } => job::resolve(config, &job_id).await,
        Commands::Model {
            job_id,
            show_config,
        } => job::model(config, &job_id, show_config).await,
        Commands::Taxonomy { command } => taxonomy::handle_taxonomy_command(command, config).await,
    }
}
