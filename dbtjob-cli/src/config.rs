//! Configuration module
//!
//! Connection settings for the CLI. Every option can also be supplied through
//! the environment variable named next to it.

use clap::Args;
use dbtjob_client::ResolverConfig;
use dbtjob_client::config::{DEFAULT_SECRET_MANAGER_URI, DEFAULT_USER_AGENT};
use std::time::Duration;

/// Connection options shared by all commands
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Cloud project the job runs in (selects production mode)
    #[arg(long, env = "GCP_TARGET_PROJECT")]
    pub target_project: Option<String>,

    /// Taxonomy service base URL
    #[arg(long, env = "DLC_BASE_URI")]
    pub taxonomy_url: String,

    /// Document store base URL
    #[arg(long, env = "DMS_BASE_URI")]
    pub document_store_url: String,

    /// Secret Manager base URL
    #[arg(long, env = "SECRET_MANAGER_URI", default_value = DEFAULT_SECRET_MANAGER_URI)]
    pub secret_manager_url: String,

    /// Bearer token for Secret Manager
    #[arg(long, env = "GCP_ACCESS_TOKEN", hide_env_values = true)]
    pub secret_access_token: Option<String>,

    /// Taxonomy API key (read from Secret Manager when absent)
    #[arg(long, env = "DLC_API_KEY", hide_env_values = true)]
    pub taxonomy_api_key: Option<String>,

    /// Document store API key (read from Secret Manager when absent)
    #[arg(long, env = "DMS_API_KEY", hide_env_values = true)]
    pub document_store_api_key: Option<String>,

    /// User agent sent to the taxonomy service
    #[arg(long, env = "DBTJOB_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "DBTJOB_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl From<ConnectionArgs> for ResolverConfig {
    fn from(args: ConnectionArgs) -> Self {
        let mut config = ResolverConfig::new(args.taxonomy_url, args.document_store_url)
            .with_secret_manager(args.secret_manager_url, args.secret_access_token)
            .with_user_agent(args.user_agent)
            .with_request_timeout(Duration::from_secs(args.timeout_secs));

        config.target_project = args.target_project;
        config.taxonomy_api_key = args.taxonomy_api_key;
        config.document_store_api_key = args.document_store_api_key;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        connection: ConnectionArgs,
    }

    #[test]
    fn test_args_into_resolver_config() {
        let cli = TestCli::try_parse_from([
            "dbtjob",
            "--taxonomy-url",
            "http://dlc.local/",
            "--document-store-url",
            "http://dms.local",
            "--target-project",
            "foundations-prd-1sm9",
            "--taxonomy-api-key",
            "dlc",
            "--document-store-api-key",
            "dms",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let config: ResolverConfig = cli.connection.into();

        assert_eq!(config.taxonomy_base_uri, "http://dlc.local");
        assert_eq!(config.document_store_base_uri, "http://dms.local");
        assert_eq!(config.taxonomy_api_key.as_deref(), Some("dlc"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.is_production());
        assert!(config.validate().is_ok());
    }
}
