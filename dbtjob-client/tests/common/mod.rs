//! Shared helpers for client integration tests

#![allow(dead_code)]

use dbtjob_client::{JobResolver, ResolverConfig};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TAXONOMY_KEY: &str = "dlc-test-key";
pub const DOCUMENT_KEY: &str = "dms-test-key";

/// Config pointing both services at `server`, with explicit API keys
pub fn config_for(server: &MockServer) -> ResolverConfig {
    ResolverConfig::new(server.uri(), server.uri())
        .with_taxonomy_api_key(TAXONOMY_KEY)
        .with_document_store_api_key(DOCUMENT_KEY)
}

pub async fn resolver_for(server: &MockServer) -> JobResolver {
    JobResolver::connect(&config_for(server))
        .await
        .expect("Failed to create resolver")
}

/// Mount a taxonomy listing mapping `spark` to 7
pub async fn mount_taxonomy(server: &MockServer, expected_calls: u64) {
    let tags = json!([
        {"name": "spark", "id": 7, "category": "PIPELINE_PLATFORM"},
        {"name": "beam", "id": 9, "category": "PIPELINE_PLATFORM"},
        {"name": "finance", "id": 11, "category": "DOMAIN"}
    ]);

    Mock::given(method("GET"))
        .and(path("/taxonomy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mount the job config search for `job_id`
pub async fn mount_job_config(server: &MockServer, job_id: &str, records: Value) {
    Mock::given(method("POST"))
        .and(path("/documents/get"))
        .and(body_partial_json(json!({
            "documentType": "PipelineJob",
            "externalIds": [{"externalIdType": "JobId", "value": job_id}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount the shared config search for `taxonomy_id`
pub async fn mount_shared_config(
    server: &MockServer,
    taxonomy_id: i64,
    records: Value,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path("/documents/get"))
        .and(body_partial_json(json!({
            "documentType": "SharedPipelineJob",
            "externalIds": [{"externalIdType": "PipelinePlatformId", "value": taxonomy_id}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .expect(expected_calls)
        .mount(server)
        .await;
}
