/// Chain id -> subgraph endpoint resolution
///
/// Validation runs before any network activity, in this order: decimal
/// format, supported set, API key, endpoint templates.
use crate::config::{ChainEndpoints, Config, API_KEY_PLACEHOLDER};
use crate::errors::{TagError, TagResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

static CHAIN_ID_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("chain id pattern is valid"));

static SEGMENT_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost/").expect("segment base url is valid"));

/// Percent-encode `value` as a single URL path segment (`/` and space included)
pub fn encode_path_segment(value: &str) -> String {
    let mut url = SEGMENT_BASE.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Endpoints for one request, with the API key substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    /// Canonical decimal chain id (no leading zeros)
    pub chain_id: String,
    pub gauges: String,
    pub pools: String,
}

/// Immutable endpoint table, built once from configuration
#[derive(Debug, Clone)]
pub struct PartitionResolver {
    supported: BTreeSet<u64>,
    chains: BTreeMap<String, ChainEndpoints>,
}

impl PartitionResolver {
    pub fn new(
        supported: impl IntoIterator<Item = u64>,
        chains: BTreeMap<String, ChainEndpoints>,
    ) -> Self {
        Self {
            supported: supported.into_iter().collect(),
            chains,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.query.supported_chains.iter().copied(),
            config.chains.clone(),
        )
    }

    pub fn supported_chains(&self) -> impl Iterator<Item = u64> + '_ {
        self.supported.iter().copied()
    }

    fn supported_list(&self) -> String {
        self.supported
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn unsupported(&self, chain_id: &str) -> TagError {
        TagError::UnsupportedPartition {
            chain_id: chain_id.to_string(),
            supported: self.supported_list(),
        }
    }

    pub fn resolve(&self, chain_id: &str, api_key: &str) -> TagResult<ResolvedEndpoints> {
        if !CHAIN_ID_FORMAT.is_match(chain_id) {
            return Err(TagError::InvalidPartition {
                chain_id: chain_id.to_string(),
            });
        }
        let numeric: u64 = chain_id.parse().map_err(|_| TagError::InvalidPartition {
            chain_id: chain_id.to_string(),
        })?;

        if !self.supported.contains(&numeric) {
            return Err(self.unsupported(chain_id));
        }

        if api_key.trim().is_empty() {
            return Err(TagError::MissingCredential);
        }

        let canonical = numeric.to_string();
        let templates = self
            .chains
            .get(&canonical)
            .filter(|endpoints| endpoints.is_complete())
            .ok_or_else(|| self.unsupported(chain_id))?;

        let encoded_key = encode_path_segment(api_key);
        Ok(ResolvedEndpoints {
            chain_id: canonical,
            gauges: templates.gauges.replace(API_KEY_PLACEHOLDER, &encoded_key),
            pools: templates.pools.replace(API_KEY_PLACEHOLDER, &encoded_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PartitionResolver {
        PartitionResolver::from_config(&Config::default())
    }

    #[test]
    fn test_every_supported_chain_resolves() {
        let resolver = resolver();
        for chain_id in resolver.supported_chains().collect::<Vec<_>>() {
            let resolved = resolver.resolve(&chain_id.to_string(), "k1").unwrap();
            assert_eq!(resolved.chain_id, chain_id.to_string());
            assert!(resolved.gauges.contains("/api/k1/"));
            assert!(resolved.pools.contains("/api/k1/"));
            assert!(!resolved.gauges.contains(API_KEY_PLACEHOLDER));
        }
    }

    #[test]
    fn test_non_decimal_ids_are_invalid() {
        let resolver = resolver();
        for bad in ["", " 10", "10 ", "0xa", "1e3", "-10", "١٠", "99999999999999999999999"] {
            assert!(
                matches!(
                    resolver.resolve(bad, "k1"),
                    Err(TagError::InvalidPartition { .. })
                ),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_unsupported_id_names_supported_set() {
        let err = resolver().resolve("999", "k1").unwrap_err();
        match err {
            TagError::UnsupportedPartition { chain_id, supported } => {
                assert_eq!(chain_id, "999");
                assert!(supported.contains("10"));
                assert!(supported.contains("42161"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_key_is_missing_credential() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("10", ""), Err(TagError::MissingCredential));
        assert_eq!(resolver.resolve("10", "  \t"), Err(TagError::MissingCredential));
    }

    #[test]
    fn test_partition_checked_before_credential() {
        assert!(matches!(
            resolver().resolve("999", ""),
            Err(TagError::UnsupportedPartition { .. })
        ));
    }

    #[test]
    fn test_key_is_encoded_as_path_segment() {
        let resolved = resolver().resolve("10", "a b").unwrap();
        assert_eq!(
            resolved.gauges,
            "https://gateway.thegraph.com/api/a%20b/subgraphs/name/balancer-labs/balancer-gauges-optimism"
        );

        let resolved = resolver().resolve("10", "a/b+c%d?").unwrap();
        assert!(resolved.pools.contains("/api/a%2Fb+c%25d%3F/"));
    }

    #[test]
    fn test_plain_key_is_unchanged() {
        assert_eq!(encode_path_segment("k1-AbC_9"), "k1-AbC_9");
    }

    #[test]
    fn test_leading_zeros_resolve_to_canonical_id() {
        let resolved = resolver().resolve("010", "k1").unwrap();
        assert_eq!(resolved.chain_id, "10");
    }

    #[test]
    fn test_supported_without_templates_fails_closed() {
        let mut chains = BTreeMap::new();
        chains.insert(
            "10".to_string(),
            ChainEndpoints {
                gauges: "https://g.test/{api_key}".to_string(),
                pools: String::new(),
            },
        );
        let resolver = PartitionResolver::new([10, 137], chains);

        assert!(matches!(
            resolver.resolve("10", "k1"),
            Err(TagError::UnsupportedPartition { .. })
        ));
        assert!(matches!(
            resolver.resolve("137", "k1"),
            Err(TagError::UnsupportedPartition { .. })
        ));
    }
}
