//! Job resolution
//!
//! Turns a pipeline job id into the dbt selector that builds its table:
//! 1. Fetch the job config from the document store
//! 2. If it names a platform tag, fetch the platform's shared config via
//!    its taxonomy id and merge the job config over it
//! 3. Read `foundations-table-name` from the result
//!
//! Each step runs after the previous one; any error aborts the resolution.

use dbtjob_core::domain::job::{JobConfig, ResolvedJob, TABLE_NAME_KEY, platform_tag, table_name};
use dbtjob_core::{deep_merge, format_invocation};
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::ResolverConfig;
use crate::documents::DocumentStoreClient;
use crate::error::{ClientError, Result};
use crate::http_client;
use crate::secrets::{SecretManagerClient, SecretStore};
use crate::taxonomy::TaxonomyClient;

/// What a resolver needs to build its taxonomy client on first use
#[derive(Debug)]
struct TaxonomySource {
    config: ResolverConfig,
    client: Client,
    secrets: Option<SecretManagerClient>,
}

/// Resolves job ids to dbt models
///
/// Owns at most one [`TaxonomyClient`], so the taxonomy listing is fetched
/// at most once over the resolver's lifetime. Resolvers made by
/// [`JobResolver::connect`] build that client only when a job first names a
/// platform tag.
#[derive(Debug)]
pub struct JobResolver {
    documents: DocumentStoreClient,
    taxonomy: OnceCell<TaxonomyClient>,
    taxonomy_source: Option<TaxonomySource>,
}

impl JobResolver {
    /// Create a resolver from already constructed clients
    pub fn new(documents: DocumentStoreClient, taxonomy: TaxonomyClient) -> Self {
        Self {
            documents,
            taxonomy: OnceCell::new_with(Some(taxonomy)),
            taxonomy_source: None,
        }
    }

    /// Validate `config` and build the document store client
    ///
    /// The document store API key is resolved here. The taxonomy API key is
    /// only resolved once a job names a platform tag.
    pub async fn connect(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;

        let client = http_client(config)?;
        let secrets = if config.needs_secret_store() {
            Some(SecretManagerClient::from_config(config, client.clone())?)
        } else {
            None
        };

        let documents = DocumentStoreClient::from_config(
            config,
            client.clone(),
            secrets.as_ref().map(|s| s as &dyn SecretStore),
        )
        .await?;

        Ok(Self {
            documents,
            taxonomy: OnceCell::new(),
            taxonomy_source: Some(TaxonomySource {
                config: config.clone(),
                client,
                secrets,
            }),
        })
    }

    /// The taxonomy client used for platform tag lookups, built on first use
    pub async fn taxonomy(&self) -> Result<&TaxonomyClient> {
        self.taxonomy
            .get_or_try_init(|| async {
                let source = self.taxonomy_source.as_ref().ok_or_else(|| {
                    ClientError::Config("no taxonomy client configured".to_string())
                })?;
                let secrets = source.secrets.as_ref().map(|s| s as &dyn SecretStore);

                TaxonomyClient::from_config(&source.config, source.client.clone(), secrets).await
            })
            .await
    }

    /// The document store client used for config lookups
    pub fn documents(&self) -> &DocumentStoreClient {
        &self.documents
    }

    /// Format the dbt selector and vars for a job
    ///
    /// Returns `+{model} --vars '{"pool_name": "{pool}", "scala_job_id": "{job_id}"}'`
    /// where `pool` is the job id with `/` replaced by `_`. Nothing is
    /// escaped; job ids and models containing quotes break the quoting.
    pub async fn fetch_model_and_pool_name(&self, job_id: &str) -> Result<String> {
        let model = self.fetch_model_by_job_id(job_id).await?;
        Ok(format_invocation(&model, job_id))
    }

    /// Resolve the dbt model (table name) of a job
    pub async fn fetch_model_by_job_id(&self, job_id: &str) -> Result<String> {
        Ok(self.resolve_job(job_id).await?.model)
    }

    /// Resolve a job's merged config and model
    ///
    /// # Errors
    /// - `NotFound` if the job config, taxonomy tag or shared config is missing
    /// - `Validation` if the merged config has no table name
    pub async fn resolve_job(&self, job_id: &str) -> Result<ResolvedJob> {
        let job_config = self.documents.fetch_job_config(job_id).await?;
        let config = self.merge_shared_config(job_id, job_config).await?;

        let model = table_name(&config).ok_or_else(|| {
            ClientError::Validation(format!(
                "no '{}' found in config for job id {}",
                TABLE_NAME_KEY, job_id
            ))
        })?;
        info!("Resolved job {} to model {}", job_id, model);

        Ok(ResolvedJob {
            job_id: job_id.to_string(),
            model,
            config,
        })
    }

    async fn merge_shared_config(&self, job_id: &str, job_config: JobConfig) -> Result<JobConfig> {
        let Some(tag) = platform_tag(&job_config) else {
            warn!(
                "No platformTag found in job config for job id {}, using job config only",
                job_id
            );
            return Ok(job_config);
        };

        // Platforms are named by strings; any other tag cannot match one
        let tag = tag.as_str().ok_or_else(|| {
            ClientError::NotFound(format!("no taxonomy id for platform tag {}", tag))
        })?;

        let taxonomy_id = self.taxonomy().await?.get_taxonomy_tag_id(tag).await?;
        let shared_config = self.documents.fetch_shared_platform_config(taxonomy_id).await?;
        info!(
            "Merging job {} over shared config of platform {} ({})",
            job_id, tag, taxonomy_id
        );

        Ok(deep_merge(&shared_config, &job_config))
    }
}
