//! Remote restriction source.
//!
//! The validator is wired against the [`RestrictionSource`] trait so call
//! sites and tests can inject their own implementation;
//! [`HttpRestrictionSource`] is the production implementation talking to
//! the vocabulary service.

use crate::config::SourceConfig;
use crate::error::DatatypeError;
use crate::model::{RestrictionMap, RestrictionsDto, compile_restrictions};
use async_trait::async_trait;
use tracing::debug;

/// Provider of the full restriction map of the active project.
#[async_trait]
pub trait RestrictionSource: Send + Sync {
    /// Fetch all user-defined datatype restrictions. One call returns the
    /// complete map; callers replace their cache wholesale with the result.
    async fn fetch_restrictions(&self) -> Result<RestrictionMap, DatatypeError>;
}

/// HTTP client for the vocabulary service's restriction endpoint.
pub struct HttpRestrictionSource {
    config: SourceConfig,
    client: reqwest::Client,
}

impl HttpRestrictionSource {
    pub fn new(config: SourceConfig) -> Result<Self, DatatypeError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { config, client })
    }

    fn restrictions_url(&self) -> String {
        format!(
            "{}/projects/{}/datatypes/restrictions",
            self.config.base_url.trim_end_matches('/'),
            self.config.project
        )
    }
}

#[async_trait]
impl RestrictionSource for HttpRestrictionSource {
    async fn fetch_restrictions(&self) -> Result<RestrictionMap, DatatypeError> {
        let url = self.restrictions_url();
        debug!(%url, "fetching datatype restrictions");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DatatypeError::Fetch {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        let payload: RestrictionsDto = response
            .json()
            .await
            .map_err(|err| DatatypeError::Decode(err.to_string()))?;
        Ok(compile_restrictions(payload))
    }
}

/// Body excerpt for error messages; service error pages can be long.
fn excerpt(body: &str) -> String {
    const MAX: usize = 256;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrictions_url_normalizes_trailing_slash() {
        let source =
            HttpRestrictionSource::new(SourceConfig::new("http://svc:8080/", "thesaurus")).unwrap();
        assert_eq!(
            source.restrictions_url(),
            "http://svc:8080/projects/thesaurus/datatypes/restrictions"
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = HttpRestrictionSource::new(SourceConfig::new("http://svc:8080", ""));
        assert!(result.is_err());
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        let short = excerpt(&long);
        assert!(short.chars().count() <= 129);
        assert!(short.ends_with('…'));
        assert_eq!(excerpt("tiny"), "tiny");
    }
}
