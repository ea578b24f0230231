//! Error taxonomy for restriction fetching, compilation and configuration.
//!
//! Validation itself never fails: `DatatypeValidator::is_valid` always
//! answers with a boolean. Errors arise only from the one asynchronous
//! fetch, from malformed restriction definitions rejected at compile time,
//! and from configuration mistakes.

use thiserror::Error;

/// Errors surfaced by the restriction source and the definition-time checks.
#[derive(Debug, Error)]
pub enum DatatypeError {
    /// The remote service answered with a non-success status.
    #[error("restriction fetch failed with status {status}: {message}")]
    Fetch { status: u16, message: String },

    /// Transport-level failure before a response arrived.
    #[error("restriction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the restriction payload.
    #[error("malformed restriction payload: {0}")]
    Decode(String),

    /// A datatype or base IRI in a restriction definition is not a valid IRI.
    #[error("invalid datatype IRI {iri:?}: {reason}")]
    InvalidIri { iri: String, reason: String },

    /// A facet record sets both the exclusive and the inclusive variant of
    /// the same bound direction.
    #[error("conflicting facet bounds: {0}")]
    InvalidFacets(String),

    /// A facet pattern is not a syntactically valid regular expression.
    /// Rejected when a restriction is defined, never during validation.
    #[error("invalid facet pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The source configuration is unusable.
    #[error("invalid source configuration: {0}")]
    Config(String),
}

impl DatatypeError {
    /// Error category for logging and telemetry.
    pub fn category(&self) -> &'static str {
        match self {
            DatatypeError::Fetch { .. } => "service_error",
            DatatypeError::Transport(_) => "transport_error",
            DatatypeError::Decode(_) => "decode_error",
            DatatypeError::InvalidIri { .. }
            | DatatypeError::InvalidFacets(_)
            | DatatypeError::InvalidPattern { .. } => "definition_error",
            DatatypeError::Config(_) => "config_error",
        }
    }

    /// Whether retrying the operation could succeed without an
    /// administrator changing anything.
    pub fn is_retryable(&self) -> bool {
        match self {
            DatatypeError::Transport(_) => true,
            DatatypeError::Fetch { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = DatatypeError::Fetch {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.category(), "service_error");
        assert_eq!(
            DatatypeError::Decode("truncated".into()).category(),
            "decode_error"
        );
        assert_eq!(
            DatatypeError::InvalidPattern {
                pattern: "[".into(),
                reason: "unclosed class".into(),
            }
            .category(),
            "definition_error"
        );
        assert_eq!(
            DatatypeError::Config("empty project".into()).category(),
            "config_error"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(
            DatatypeError::Fetch {
                status: 503,
                message: String::new(),
            }
            .is_retryable()
        );
        assert!(
            !DatatypeError::Fetch {
                status: 404,
                message: String::new(),
            }
            .is_retryable()
        );
        assert!(!DatatypeError::InvalidFacets("both min bounds".into()).is_retryable());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = DatatypeError::InvalidIri {
            iri: "not an iri".into(),
            reason: "no scheme".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("not an iri"));
        assert!(rendered.contains("no scheme"));
    }
}
