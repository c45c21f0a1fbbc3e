//! Resolver configuration
//!
//! Connection settings for the three remote collaborators (secret store,
//! taxonomy service, document store) plus request tuning. The struct is
//! built by the caller and validated before any client is constructed.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Target project of the production deployment
pub const PRODUCTION_PROJECT: &str = "foundations-prd-1sm9";

/// Default Secret Manager endpoint
pub const DEFAULT_SECRET_MANAGER_URI: &str = "https://secretmanager.googleapis.com";

/// Default user agent sent to the taxonomy service
pub const DEFAULT_USER_AGENT: &str = "Foundations DBT Runner";

/// Default timeout applied to every outbound request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Cloud project the job runs in; selects production mode and the
    /// project secrets are read from
    pub target_project: Option<String>,

    /// Taxonomy service base URL
    pub taxonomy_base_uri: String,

    /// Document store base URL
    pub document_store_base_uri: String,

    /// Secret Manager base URL
    pub secret_manager_base_uri: String,

    /// Bearer token for Secret Manager, if it requires one
    pub secret_access_token: Option<String>,

    /// Taxonomy API key; read from the secret store when absent
    pub taxonomy_api_key: Option<String>,

    /// Document store API key; read from the secret store when absent
    pub document_store_api_key: Option<String>,

    /// User agent for taxonomy requests
    pub user_agent: String,

    /// Timeout applied to each outbound request
    pub request_timeout: Duration,
}

impl ResolverConfig {
    /// Creates a configuration with defaults for everything but the two
    /// service URLs
    pub fn new(taxonomy_base_uri: impl Into<String>, document_store_base_uri: impl Into<String>) -> Self {
        Self {
            target_project: None,
            taxonomy_base_uri: trim_base(taxonomy_base_uri.into()),
            document_store_base_uri: trim_base(document_store_base_uri.into()),
            secret_manager_base_uri: DEFAULT_SECRET_MANAGER_URI.to_string(),
            secret_access_token: None,
            taxonomy_api_key: None,
            document_store_api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_target_project(mut self, project: impl Into<String>) -> Self {
        self.target_project = Some(project.into());
        self
    }

    pub fn with_secret_manager(mut self, base_uri: impl Into<String>, access_token: Option<String>) -> Self {
        self.secret_manager_base_uri = trim_base(base_uri.into());
        self.secret_access_token = access_token;
        self
    }

    pub fn with_taxonomy_api_key(mut self, key: impl Into<String>) -> Self {
        self.taxonomy_api_key = Some(key.into());
        self
    }

    pub fn with_document_store_api_key(mut self, key: impl Into<String>) -> Self {
        self.document_store_api_key = Some(key.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether the target project is the production project
    ///
    /// Production resolutions never see unreleased documents.
    pub fn is_production(&self) -> bool {
        self.target_project.as_deref() == Some(PRODUCTION_PROJECT)
    }

    /// Whether some API key has to come from the secret store
    pub fn needs_secret_store(&self) -> bool {
        !has_value(&self.taxonomy_api_key) || !has_value(&self.document_store_api_key)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        check_url("taxonomy_base_uri", &self.taxonomy_base_uri)?;
        check_url("document_store_base_uri", &self.document_store_base_uri)?;

        if self.request_timeout.is_zero() {
            return Err(ClientError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.needs_secret_store() {
            if !has_value(&self.target_project) {
                return Err(ClientError::Config(
                    "target_project is required to read API keys from the secret store".to_string(),
                ));
            }
            check_url("secret_manager_base_uri", &self.secret_manager_base_uri)?;
        }

        Ok(())
    }
}

fn has_value(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn check_url(field: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(ClientError::Config(format!("{} cannot be empty", field)));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::Config(format!(
            "{} must start with http:// or https://",
            field
        )));
    }

    Ok(())
}
