//! Secret store access
//!
//! API keys for the taxonomy service and the document store live in Secret
//! Manager unless they are supplied explicitly. Only the latest version of a
//! secret is ever read.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dbtjob_core::dto::secret::{AccessSecretVersionResponse, latest_version_path};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{ClientError, Result};
use crate::handle_response;

/// Secret holding the taxonomy service API key
pub const TAXONOMY_API_KEY_SECRET: &str = "DLC_API_KEY";

/// Secret holding the document store API key
pub const DOCUMENT_STORE_API_KEY_SECRET: &str = "DMS_API_KEY";

/// Read access to named secrets
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the latest value of a secret as UTF-8 text
    ///
    /// # Errors
    /// `NotFound` if the secret or its latest version does not exist.
    async fn get_secret(&self, name: &str) -> Result<String>;
}

/// Secret Manager REST client
#[derive(Debug, Clone)]
pub struct SecretManagerClient {
    base_url: String,
    project: String,
    access_token: Option<String>,
    client: Client,
}

impl SecretManagerClient {
    /// Create a client reading secrets of `project`
    ///
    /// # Errors
    /// `Config` if `project` is missing or empty.
    pub fn new(
        base_url: impl Into<String>,
        project: Option<String>,
        access_token: Option<String>,
        client: Client,
    ) -> Result<Self> {
        let project = project.filter(|p| !p.is_empty()).ok_or_else(|| {
            ClientError::Config("target project must be set to read secrets".to_string())
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project,
            access_token,
            client,
        })
    }

    /// Create a client from the resolver configuration
    pub fn from_config(config: &ResolverConfig, client: Client) -> Result<Self> {
        Self::new(
            config.secret_manager_base_uri.clone(),
            config.target_project.clone(),
            config.secret_access_token.clone(),
            client,
        )
    }

    /// Project secrets are read from
    pub fn project(&self) -> &str {
        &self.project
    }
}

#[async_trait]
impl SecretStore for SecretManagerClient {
    async fn get_secret(&self, name: &str) -> Result<String> {
        let path = latest_version_path(&self.project, name);
        let url = format!("{}/v1/{}:access", self.base_url, path);
        debug!("Accessing secret {}", path);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("secret {}", path)));
        }

        let body: AccessSecretVersionResponse = handle_response("secret manager", response).await?;
        let bytes = STANDARD
            .decode(body.payload.data.as_bytes())
            .map_err(|e| ClientError::Parse(format!("secret {} is not valid base64: {}", name, e)))?;

        String::from_utf8(bytes)
            .map_err(|e| ClientError::Parse(format!("secret {} is not valid UTF-8: {}", name, e)))
    }
}

/// Returns the explicit API key, or reads `secret_name` from the secret store
///
/// # Errors
/// `Config` when neither source yields a non-empty key.
pub(crate) async fn resolve_api_key(
    explicit: Option<&str>,
    secrets: Option<&dyn SecretStore>,
    secret_name: &str,
) -> Result<String> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    let Some(secrets) = secrets else {
        return Err(ClientError::Config(format!(
            "{} was not supplied and no secret store is configured",
            secret_name
        )));
    };

    let key = match secrets.get_secret(secret_name).await {
        Ok(key) => key,
        Err(ClientError::NotFound(what)) => {
            return Err(ClientError::Config(format!(
                "{} not found in secret store ({})",
                secret_name, what
            )));
        }
        Err(e) => return Err(e),
    };

    if key.is_empty() {
        return Err(ClientError::Config(format!(
            "{} secret in secret store is empty",
            secret_name
        )));
    }

    Ok(key)
}
