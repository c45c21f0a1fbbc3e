//! dbtjob HTTP Client
//!
//! Clients for the services a job resolution talks to, and the
//! [`JobResolver`] that ties them together:
//! - Secret store: API keys ([`SecretManagerClient`])
//! - Taxonomy service: platform tag ids, cached per instance ([`TaxonomyClient`])
//! - Document store: job and shared platform configs ([`DocumentStoreClient`])
//!
//! # Example
//!
//! ```no_run
//! use dbtjob_client::{JobResolver, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ResolverConfig::new("https://dlc.example.com", "https://dms.example.com")
//!         .with_target_project("foundations-dev");
//!
//!     let resolver = JobResolver::connect(&config).await?;
//!     println!("{}", resolver.fetch_model_and_pool_name("teamA/pipeline1").await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod documents;
pub mod error;
pub mod resolver;
pub mod secrets;
pub mod taxonomy;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use documents::DocumentStoreClient;
pub use error::{ClientError, Result};
pub use resolver::JobResolver;
pub use secrets::{SecretManagerClient, SecretStore};
pub use taxonomy::TaxonomyClient;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Builds the HTTP client shared by all service clients
///
/// Every request made through it is bounded by `config.request_timeout`.
pub fn http_client(config: &ResolverConfig) -> Result<Client> {
    Ok(Client::builder().timeout(config.request_timeout).build()?)
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Checks the status of a response and deserializes its JSON body
///
/// Non-success statuses become [`ClientError::Upstream`] tagged with `service`.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::upstream(service, status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(format!("Failed to parse {} response: {}", service, e)))
}
