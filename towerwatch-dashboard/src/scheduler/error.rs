//! Poll cycle errors

use thiserror::Error;
use towerwatch_client::ClientError;
use towerwatch_core::domain::snapshot::KeyMismatch;

/// Why a poll cycle did not produce a snapshot
#[derive(Debug, Error)]
pub enum PollError {
    /// Network failure or non-success response
    #[error("Failed to fetch {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: ClientError,
    },

    /// Response body did not match the record contracts
    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: ClientError,
    },

    /// Runner map keyed inconsistently with the records it holds
    #[error("Inconsistent runner map: {0}")]
    Inconsistent(#[from] KeyMismatch),

    #[error("Poll interval must be greater than 0")]
    InvalidInterval,
}

impl PollError {
    /// Classifies a client error for `resource`
    pub fn from_client(resource: &'static str, source: ClientError) -> Self {
        if source.is_decode() {
            Self::Decode { resource, source }
        } else {
            Self::Fetch { resource, source }
        }
    }

    /// True for payloads that arrived but had the wrong shape
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Inconsistent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_classifies() {
        let fetch = PollError::from_client("runners", ClientError::api_error(502, "bad gateway"));
        assert!(matches!(fetch, PollError::Fetch { resource: "runners", .. }));
        assert!(!fetch.is_decode());

        let source = serde_json::from_str::<u16>("\"x\"").unwrap_err();
        let decode = PollError::from_client(
            "jobs",
            ClientError::Decode {
                resource: "jobs",
                source,
            },
        );
        assert!(matches!(decode, PollError::Decode { resource: "jobs", .. }));
        assert!(decode.is_decode());
    }

    #[test]
    fn test_inconsistent_counts_as_decode() {
        let err = PollError::from(KeyMismatch {
            key: "a".to_string(),
            id: "b".to_string(),
        });
        assert!(err.is_decode());
        assert_eq!(
            err.to_string(),
            "Inconsistent runner map: runner keyed as 'a' reports ID 'b'"
        );
    }
}
