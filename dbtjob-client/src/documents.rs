//! Document store client
//!
//! Job configs and shared platform configs are documents indexed by an
//! external id. Outside production, unreleased documents are visible too.

use dbtjob_core::domain::job::JobConfig;
use dbtjob_core::dto::document::{DocumentRecord, DocumentSearchRequest};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{ClientError, Result};
use crate::handle_response;
use crate::secrets::{DOCUMENT_STORE_API_KEY_SECRET, SecretStore, resolve_api_key};

/// HTTP client for the document store
#[derive(Debug, Clone)]
pub struct DocumentStoreClient {
    search_url: String,
    headers: HeaderMap,
    include_unreleased: bool,
    client: Client,
}

impl DocumentStoreClient {
    /// Create a document store client
    ///
    /// # Arguments
    /// * `base_url` - The document store base URL
    /// * `api_key` - Value of the `api-key` header
    /// * `production` - Hide unreleased documents
    /// * `client` - A configured reqwest Client
    pub fn new(base_url: &str, api_key: &str, production: bool, client: Client) -> Result<Self> {
        if api_key.is_empty() {
            return Err(ClientError::Config("document store API key is empty".to_string()));
        }

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| ClientError::Config(format!("invalid document store API key: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            search_url: format!(
                "{}/documents/get?keyed=true&json=true",
                base_url.trim_end_matches('/')
            ),
            headers,
            include_unreleased: !production,
            client,
        })
    }

    /// Create a client from the resolver configuration
    ///
    /// The API key comes from `config.document_store_api_key`, or else from
    /// the `DMS_API_KEY` secret.
    pub async fn from_config(
        config: &ResolverConfig,
        client: Client,
        secrets: Option<&dyn SecretStore>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(
            config.document_store_api_key.as_deref(),
            secrets,
            DOCUMENT_STORE_API_KEY_SECRET,
        )
        .await?;

        Self::new(
            &config.document_store_base_uri,
            &api_key,
            config.is_production(),
            client,
        )
    }

    /// Whether searches include unreleased documents
    pub fn include_unreleased(&self) -> bool {
        self.include_unreleased
    }

    /// Run a document search
    pub async fn search(&self, request: &DocumentSearchRequest) -> Result<Vec<DocumentRecord>> {
        debug!(
            "Searching {} documents (include_unreleased={})",
            request.document_type, request.include_unreleased
        );

        let response = self
            .client
            .post(&self.search_url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await?;

        handle_response("document store", response).await
    }

    /// Fetch the latest config of a job
    ///
    /// # Errors
    /// `NotFound` if the search returns no records.
    pub async fn fetch_job_config(&self, job_id: &str) -> Result<JobConfig> {
        let request = DocumentSearchRequest::job_config(job_id, self.include_unreleased);

        self.first_config(&request)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("no job config for job id {}", job_id)))
    }

    /// Fetch the latest shared config of a pipeline platform
    ///
    /// # Errors
    /// `NotFound` if the search returns no records.
    pub async fn fetch_shared_platform_config(&self, taxonomy_id: i64) -> Result<JobConfig> {
        let request = DocumentSearchRequest::shared_platform_config(taxonomy_id, self.include_unreleased);

        self.first_config(&request).await?.ok_or_else(|| {
            ClientError::NotFound(format!("no shared config for taxonomy id {}", taxonomy_id))
        })
    }

    async fn first_config(&self, request: &DocumentSearchRequest) -> Result<Option<JobConfig>> {
        let records = self.search(request).await?;
        Ok(records.into_iter().next().map(DocumentRecord::into_config))
    }
}
