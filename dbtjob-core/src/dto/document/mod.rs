//! Document store DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::JobConfig;

/// Document type of per-job configs
pub const PIPELINE_JOB_DOCUMENT: &str = "PipelineJob";
/// Document type of shared platform configs
pub const SHARED_PIPELINE_JOB_DOCUMENT: &str = "SharedPipelineJob";
/// External id type keying job configs
pub const JOB_ID_TYPE: &str = "JobId";
/// External id type keying shared platform configs
pub const PIPELINE_PLATFORM_ID_TYPE: &str = "PipelinePlatformId";

/// External identifier a document is indexed by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalId {
    pub external_id_type: String,
    pub value: Value,
}

/// Body of a document search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSearchRequest {
    pub external_ids: Vec<ExternalId>,
    pub document_type: String,
    pub include_unreleased: bool,
    pub latest_only: bool,
}

impl DocumentSearchRequest {
    /// Search for the latest config of a job
    pub fn job_config(job_id: &str, include_unreleased: bool) -> Self {
        Self {
            external_ids: vec![ExternalId {
                external_id_type: JOB_ID_TYPE.to_string(),
                value: Value::from(job_id),
            }],
            document_type: PIPELINE_JOB_DOCUMENT.to_string(),
            include_unreleased,
            latest_only: true,
        }
    }

    /// Search for the latest shared config of a pipeline platform
    pub fn shared_platform_config(taxonomy_id: i64, include_unreleased: bool) -> Self {
        Self {
            external_ids: vec![ExternalId {
                external_id_type: PIPELINE_PLATFORM_ID_TYPE.to_string(),
                value: Value::from(taxonomy_id),
            }],
            document_type: SHARED_PIPELINE_JOB_DOCUMENT.to_string(),
            include_unreleased,
            latest_only: true,
        }
    }
}

/// One search result
///
/// Only the `json` payload is used; a missing or null payload reads as an
/// empty config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub json: Option<JobConfig>,
}

impl DocumentRecord {
    pub fn into_config(self) -> JobConfig {
        self.json.unwrap_or_default()
    }
}
