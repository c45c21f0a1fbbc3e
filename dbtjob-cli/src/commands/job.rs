//! Job command handlers
//!
//! `resolve` prints the bare invocation string so it can be spliced into a
//! dbt command line; `model` is for humans.

use anyhow::{Context, Result};
use colored::*;
use dbtjob_client::{JobResolver, ResolverConfig};
use dbtjob_core::format_invocation;

/// Print the dbt selector and vars for a job
pub async fn resolve(config: &ResolverConfig, job_id: &str) -> Result<()> {
    let resolver = JobResolver::connect(config).await?;
    let invocation = resolver
        .fetch_model_and_pool_name(job_id)
        .await
        .with_context(|| format!("Failed to resolve job {}", job_id))?;

    println!("{}", invocation);

    Ok(())
}

/// Print the model of a job, optionally with its merged config
pub async fn model(config: &ResolverConfig, job_id: &str, show_config: bool) -> Result<()> {
    let resolver = JobResolver::connect(config).await?;
    let resolved = resolver
        .resolve_job(job_id)
        .await
        .with_context(|| format!("Failed to resolve job {}", job_id))?;

    println!("{}", "Job Details:".bold());
    println!("  Job ID:     {}", resolved.job_id.cyan());
    println!("  Model:      {}", resolved.model.green());
    println!(
        "  Invocation: {}",
        format_invocation(&resolved.model, &resolved.job_id).dimmed()
    );

    if show_config {
        println!("\n{}", "Merged Config:".bold());
        println!("{}", serde_json::to_string_pretty(&resolved.config)?);
    }

    Ok(())
}
