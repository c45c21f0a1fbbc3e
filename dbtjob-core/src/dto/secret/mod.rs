//! Secret store DTOs

use serde::{Deserialize, Serialize};

/// Response of an "access secret version" call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessSecretVersionResponse {
    /// Full resource name of the accessed version
    #[serde(default)]
    pub name: Option<String>,
    pub payload: SecretPayload,
}

/// Secret payload; `data` is base64-encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretPayload {
    pub data: String,
}

/// Resource path of the latest version of a secret
pub fn latest_version_path(project: &str, secret_name: &str) -> String {
    format!("projects/{}/secrets/{}/versions/latest", project, secret_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_version_path() {
        assert_eq!(
            latest_version_path("foundations-dev", "DMS_API_KEY"),
            "projects/foundations-dev/secrets/DMS_API_KEY/versions/latest"
        );
    }
}
