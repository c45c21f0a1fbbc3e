//! Taxonomy command handlers
//!
//! Inspect the pipeline platform tags known to the taxonomy service.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use dbtjob_client::{ResolverConfig, SecretManagerClient, SecretStore, TaxonomyClient, http_client};
use tracing::debug;

/// Taxonomy subcommands
#[derive(Subcommand)]
pub enum TaxonomyCommands {
    /// List pipeline platform tags and their ids
    List,
    /// Get the taxonomy id of a platform tag
    Get {
        /// Platform tag (e.g. spark)
        tag: String,
    },
}

/// Handle taxonomy commands
///
/// # Arguments
/// * `command` - The taxonomy command to execute
/// * `config` - The resolver configuration
pub async fn handle_taxonomy_command(command: TaxonomyCommands, config: &ResolverConfig) -> Result<()> {
    let client = connect(config).await?;

    match command {
        TaxonomyCommands::List => list_platform_tags(&client).await,
        TaxonomyCommands::Get { tag } => get_tag_id(&client, &tag).await,
    }
}

/// Build a taxonomy client without touching the document store
async fn connect(config: &ResolverConfig) -> Result<TaxonomyClient> {
    config.validate()?;
    debug!("Connecting to taxonomy service at {}", config.taxonomy_base_uri);

    let http = http_client(config)?;
    let secret_manager = match config.taxonomy_api_key.as_deref() {
        Some(key) if !key.is_empty() => None,
        _ => Some(SecretManagerClient::from_config(config, http.clone())?),
    };
    let secrets = secret_manager.as_ref().map(|s| s as &dyn SecretStore);

    Ok(TaxonomyClient::from_config(config, http, secrets).await?)
}

/// List all pipeline platform tags
async fn list_platform_tags(client: &TaxonomyClient) -> Result<()> {
    let tags = client.platform_tags().await?;

    if tags.is_empty() {
        println!("{}", "No pipeline platform tags found.".yellow());
        return Ok(());
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort();

    println!(
        "{}",
        format!("Found {} pipeline platform tag(s):", tags.len()).bold()
    );
    println!();
    for (name, id) in tags {
        println!("  {} {} {}", "▸".cyan(), name.bold(), format!("({})", id).dimmed());
    }

    Ok(())
}

/// Print the id of one platform tag
async fn get_tag_id(client: &TaxonomyClient, tag: &str) -> Result<()> {
    let id = client.get_taxonomy_tag_id(tag).await?;
    println!("{}", id);
    Ok(())
}
