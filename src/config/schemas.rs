/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides:
/// - Single-source definition (no repetition)
/// - Embedded defaults
/// - Serde support
use crate::config_struct;
use crate::errors::{TagError, TagResult};
use std::collections::BTreeMap;

/// Placeholder substituted with the percent-encoded API key in endpoint templates
pub const API_KEY_PLACEHOLDER: &str = "{api_key}";

/// Marker appended to truncated name tags
pub const ELLIPSIS: &str = "...";

// ============================================================================
// QUERY CONFIGURATION
// ============================================================================

config_struct! {
    /// Subgraph query behaviour
    pub struct QueryConfig {
        /// Records requested per page; a shorter page ends pagination
        page_size: usize = crate::gauges::DEFAULT_PAGE_SIZE,
        /// Upper bound for a single request, in seconds
        timeout_secs: u64 = 30,
        /// Chain ids the resolver accepts
        supported_chains: Vec<u64> = vec![1, 10, 100, 137, 1101, 8453, 42161, 43114],
    }
}

// ============================================================================
// TAG OUTPUT CONFIGURATION
// ============================================================================

config_struct! {
    /// Fixed fields and limits for emitted descriptor records
    pub struct TagConfig {
        /// Namespace prefix of the contract address column
        address_scheme: String = "eip155".to_string(),
        project_name: String = "Balancer".to_string(),
        website: String = "https://balancer.fi".to_string(),
        /// Maximum length of the public name tag, in characters
        max_name_tag_len: usize = 45,
    }
}

// ============================================================================
// ENDPOINTS
// ============================================================================

config_struct! {
    /// Endpoint templates for one chain; `{api_key}` is replaced at resolve time
    pub struct ChainEndpoints {
        gauges: String = String::new(),
        pools: String = String::new(),
    }
}

impl ChainEndpoints {
    fn hosted(gauges: &str, pools: &str) -> Self {
        const GATEWAY: &str = "https://gateway.thegraph.com/api/{api_key}/subgraphs/name/balancer-labs";
        Self {
            gauges: format!("{}/{}", GATEWAY, gauges),
            pools: format!("{}/{}", GATEWAY, pools),
        }
    }

    /// Both templates present
    pub fn is_complete(&self) -> bool {
        !self.gauges.trim().is_empty() && !self.pools.trim().is_empty()
    }
}

fn default_chains() -> BTreeMap<String, ChainEndpoints> {
    [
        ("1", ChainEndpoints::hosted("balancer-gauges", "balancer-v2")),
        (
            "10",
            ChainEndpoints::hosted("balancer-gauges-optimism", "balancer-optimism-v2"),
        ),
        (
            "100",
            ChainEndpoints::hosted("balancer-gauges-gnosis-chain", "balancer-gnosis-chain-v2"),
        ),
        (
            "137",
            ChainEndpoints::hosted("balancer-gauges-polygon", "balancer-polygon-v2"),
        ),
        (
            "1101",
            ChainEndpoints::hosted("balancer-gauges-polygon-zkevm", "balancer-polygon-zkevm-v2"),
        ),
        (
            "8453",
            ChainEndpoints::hosted("balancer-gauges-base", "balancer-base-v2"),
        ),
        (
            "42161",
            ChainEndpoints::hosted("balancer-gauges-arbitrum", "balancer-arbitrum-v2"),
        ),
        (
            "43114",
            ChainEndpoints::hosted("balancer-gauges-avalanche", "balancer-avalanche-v2"),
        ),
    ]
    .into_iter()
    .map(|(chain_id, endpoints)| (chain_id.to_string(), endpoints))
    .collect()
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration
    pub struct Config {
        query: QueryConfig = QueryConfig::default(),
        tags: TagConfig = TagConfig::default(),
        /// Chain id (decimal string) -> endpoint templates
        chains: BTreeMap<String, ChainEndpoints> = default_chains(),
    }
}

impl Config {
    /// Reject values that would make the pipeline misbehave
    pub fn validate(&self) -> TagResult<()> {
        if self.query.page_size == 0 {
            return Err(TagError::Config(
                "query.page_size must be greater than zero".to_string(),
            ));
        }
        if self.query.timeout_secs == 0 {
            return Err(TagError::Config(
                "query.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.tags.max_name_tag_len <= ELLIPSIS.len() {
            return Err(TagError::Config(format!(
                "tags.max_name_tag_len must be greater than {}",
                ELLIPSIS.len()
            )));
        }
        if let Some(bad) = self
            .chains
            .keys()
            .find(|key| key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(TagError::Config(format!(
                "chains.{} is not a decimal chain id",
                bad
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.query.page_size, 1000);
        assert_eq!(config.query.timeout_secs, 30);
    }

    #[test]
    fn test_every_supported_chain_has_templates() {
        let config = Config::default();
        for chain_id in &config.query.supported_chains {
            let endpoints = config
                .chains
                .get(&chain_id.to_string())
                .expect("templates for supported chain");
            assert!(endpoints.is_complete());
            assert!(endpoints.gauges.contains(API_KEY_PLACEHOLDER));
            assert!(endpoints.pools.contains(API_KEY_PLACEHOLDER));
        }
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.query.page_size = 0;
        assert!(matches!(config.validate(), Err(TagError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_tiny_name_tag_limit() {
        let mut config = Config::default();
        config.tags.max_name_tag_len = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_numeric_chain_key() {
        let mut config = Config::default();
        config
            .chains
            .insert("0xa".to_string(), ChainEndpoints::default());
        assert!(config.validate().is_err());
    }
}
