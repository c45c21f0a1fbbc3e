//! Taxonomy service client
//!
//! Resolves platform tags (e.g. "spark") to the numeric taxonomy ids shared
//! platform configs are keyed by. The full tag listing is fetched once per
//! client and served from memory afterwards.

use dbtjob_core::domain::taxonomy::{PlatformTags, platform_tags};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::{ClientError, Result};
use crate::handle_response;
use crate::secrets::{SecretStore, TAXONOMY_API_KEY_SECRET, resolve_api_key};

/// HTTP client for the taxonomy service
#[derive(Debug)]
pub struct TaxonomyClient {
    base_url: String,
    headers: HeaderMap,
    client: Client,
    /// Platform tag listing; `None` until the first lookup
    cache: Mutex<Option<PlatformTags>>,
}

impl TaxonomyClient {
    /// Create a taxonomy client
    ///
    /// # Arguments
    /// * `base_url` - The taxonomy service base URL
    /// * `api_key` - Bearer token for the service
    /// * `user_agent` - User agent sent with each request
    /// * `client` - A configured reqwest Client
    ///
    /// # Errors
    /// `Config` if the key is empty or a header value is not valid.
    pub fn new(base_url: impl Into<String>, api_key: &str, user_agent: &str, client: Client) -> Result<Self> {
        if api_key.is_empty() {
            return Err(ClientError::Config("taxonomy API key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let mut auth = header_value(&format!("Bearer {}", api_key))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, header_value(user_agent)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers,
            client,
            cache: Mutex::new(None),
        })
    }

    /// Create a client from the resolver configuration
    ///
    /// The API key comes from `config.taxonomy_api_key`, or else from the
    /// `DLC_API_KEY` secret.
    pub async fn from_config(
        config: &ResolverConfig,
        client: Client,
        secrets: Option<&dyn SecretStore>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(
            config.taxonomy_api_key.as_deref(),
            secrets,
            TAXONOMY_API_KEY_SECRET,
        )
        .await?;

        Self::new(
            config.taxonomy_base_uri.clone(),
            &api_key,
            &config.user_agent,
            client,
        )
    }

    /// Get the base URL of the taxonomy service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all taxonomy tags and keep the pipeline platform ones
    ///
    /// Always issues a request; see [`Self::get_taxonomy_tag_id`] for the
    /// cached lookup.
    pub async fn fetch_taxonomy_tags(&self) -> Result<PlatformTags> {
        let url = format!("{}/taxonomy", self.base_url);
        debug!("Fetching taxonomy from {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let listing: Vec<serde_json::Value> = handle_response("taxonomy", response).await?;
        platform_tags(listing)
            .map_err(|e| ClientError::Parse(format!("Invalid pipeline platform tag: {}", e)))
    }

    /// Get the taxonomy id of a platform tag
    ///
    /// The first call populates the cache; a failed fetch leaves it empty so
    /// the next call tries again.
    ///
    /// # Errors
    /// `NotFound` if the tag is not a known pipeline platform.
    pub async fn get_taxonomy_tag_id(&self, platform_tag: &str) -> Result<i64> {
        let mut cache = self.cache.lock().await;
        let tags = match &mut *cache {
            Some(tags) => tags,
            empty => {
                let tags = self.fetch_taxonomy_tags().await?;
                info!("Cached {} pipeline platform tag(s)", tags.len());
                empty.insert(tags)
            }
        };

        tags.get(platform_tag).copied().ok_or_else(|| {
            ClientError::NotFound(format!("no taxonomy id for platform tag '{}'", platform_tag))
        })
    }

    /// All pipeline platform tags, served from the cache when populated
    pub async fn platform_tags(&self) -> Result<PlatformTags> {
        let mut cache = self.cache.lock().await;
        if let Some(tags) = &*cache {
            return Ok(tags.clone());
        }

        let tags = self.fetch_taxonomy_tags().await?;
        *cache = Some(tags.clone());
        Ok(tags)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::Config(format!("invalid taxonomy header value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TaxonomyClient::new("http://dlc.local/", "key", "agent", Client::new()).unwrap();
        assert_eq!(client.base_url(), "http://dlc.local");
        assert_eq!(client.headers[AUTHORIZATION], "Bearer key");
        assert_eq!(client.headers[USER_AGENT], "agent");
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = TaxonomyClient::new("http://dlc.local", "", "agent", Client::new()).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = TaxonomyClient::new("http://dlc.local", "bad\nkey", "agent", Client::new()).unwrap_err();
        assert!(err.is_config_error());
    }
}
