/// Structured error handling for gaugetags
///
/// Every failure is fatal to the current invocation. Network-facing variants
/// carry the feed they came from so callers can tell a gauge page failure from
/// a pool metadata failure.
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// FEED IDENTIFICATION
// =============================================================================

/// Which remote feed a request was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Liquidity gauge subgraph
    Gauges,
    /// Pool metadata subgraph
    Meta,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Gauges => "gauges",
            FeedKind::Meta => "meta",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Invalid chain id '{chain_id}': expected a decimal chain id")]
    InvalidPartition { chain_id: String },

    #[error("Unsupported chain id {chain_id}: supported chains are {supported}")]
    UnsupportedPartition { chain_id: String, supported: String },

    #[error("Missing API key: a non-empty subgraph API key is required")]
    MissingCredential,

    #[error("[{feed}] request timed out after {timeout_ms}ms")]
    Timeout { feed: FeedKind, timeout_ms: u64 },

    #[error("[{feed}] HTTP {status}: {body}")]
    Transport {
        feed: FeedKind,
        status: u16,
        body: String,
    },

    #[error("[{feed}] request failed: {reason}")]
    Network { feed: FeedKind, reason: String },

    #[error("[{feed}] subgraph returned errors: {message}")]
    RemoteQuery { feed: FeedKind, message: String },

    #[error("[{feed}] failed to decode response: {reason}")]
    Decode { feed: FeedKind, reason: String },

    #[error("[{feed}] pagination stalled: cursor '{cursor}' did not advance past '{previous}'")]
    PaginationStalled {
        feed: FeedKind,
        cursor: String,
        previous: String,
    },

    #[error("[{feed}] indexed block unavailable: {reason}")]
    SnapshotUnavailable { feed: FeedKind, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TagError {
    /// True for errors raised by request validation, before any network call
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TagError::InvalidPartition { .. }
                | TagError::UnsupportedPartition { .. }
                | TagError::MissingCredential
        )
    }

    /// Feed the failing request was addressed to, if any
    pub fn feed(&self) -> Option<FeedKind> {
        match self {
            TagError::Timeout { feed, .. }
            | TagError::Transport { feed, .. }
            | TagError::Network { feed, .. }
            | TagError::RemoteQuery { feed, .. }
            | TagError::Decode { feed, .. }
            | TagError::PaginationStalled { feed, .. }
            | TagError::SnapshotUnavailable { feed, .. } => Some(*feed),
            _ => None,
        }
    }
}

pub type TagResult<T> = Result<T, TagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_name_their_feed() {
        let err = TagError::Timeout {
            feed: FeedKind::Meta,
            timeout_ms: 30_000,
        };
        assert_eq!(err.feed(), Some(FeedKind::Meta));
        assert!(err.to_string().starts_with("[meta]"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_validation_errors_have_no_feed() {
        assert!(TagError::MissingCredential.is_input_error());
        assert_eq!(TagError::MissingCredential.feed(), None);
        assert_eq!(TagError::Config("x".to_string()).feed(), None);
    }
}
