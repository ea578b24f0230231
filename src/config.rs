//! Configuration for the remote restriction source.

use crate::error::DatatypeError;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where and how to reach the vocabulary service for the active project.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    /// Base URL of the vocabulary service.
    pub base_url: String,
    /// Name of the open project; restriction maps are scoped per project.
    pub project: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            project: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn new(base_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project: project.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), DatatypeError> {
        if self.project.trim().is_empty() {
            return Err(DatatypeError::Config("project must not be empty".into()));
        }
        reqwest::Url::parse(&self.base_url).map_err(|err| {
            DatatypeError::Config(format!("base URL {:?} does not parse: {err}", self.base_url))
        })?;
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(DatatypeError::Config("timeouts must be nonzero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_valid_config() {
        let config = SourceConfig::new("http://localhost:8080", "thesaurus");
        config.validate().expect("config is valid");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_empty_project() {
        let config = SourceConfig::new("http://localhost:8080", "  ");
        assert_matches!(config.validate(), Err(DatatypeError::Config(_)));
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let config = SourceConfig::new("not a url", "thesaurus");
        assert_matches!(config.validate(), Err(DatatypeError::Config(_)));
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let config: SourceConfig = serde_json::from_str(
            r#"{ "baseUrl": "http://svc:9090", "project": "geo" }"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://svc:9090");
        assert_eq!(config.project, "geo");
        assert_eq!(config.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    }
}
