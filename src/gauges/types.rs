/// Record types flowing through the tag pipeline
///
/// Source records mirror the subgraph payloads: optional or nullable fields
/// decode to `Option` rather than failing, so an incomplete record is skipped
/// by the join instead of aborting the run.
use serde::{Deserialize, Serialize};

/// Cursor that sorts before every address-like id
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Indexed block every page query is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotMarker(pub u64);

impl SnapshotMarker {
    pub fn block(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SnapshotMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Records that can be paged by an ascending unique key
pub trait CursorKey {
    fn cursor(&self) -> &str;
}

// ============================================================================
// GAUGE FEED
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugePool {
    #[serde(default)]
    pub address: Option<String>,
}

/// Liquidity gauge; `id` is the gauge contract address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeRecord {
    pub id: String,
    #[serde(rename = "poolId", default)]
    pub pool_id: Option<String>,
    #[serde(rename = "isKilled", default)]
    pub is_killed: Option<bool>,
    #[serde(default)]
    pub pool: Option<GaugePool>,
}

impl GaugeRecord {
    pub fn pool_address(&self) -> Option<&str> {
        self.pool.as_ref().and_then(|p| p.address.as_deref())
    }
}

impl CursorKey for GaugeRecord {
    fn cursor(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// POOL METADATA FEED
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "poolType", default)]
    pub pool_type: Option<String>,
}

impl CursorKey for PoolMetadata {
    fn cursor(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// One address tag, serialized with the tag registry's column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorRecord {
    #[serde(rename = "Contract Address")]
    pub contract_address: String,
    #[serde(rename = "Public Name Tag")]
    pub public_name_tag: String,
    #[serde(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "UI/Website Link")]
    pub ui_website_link: String,
    #[serde(rename = "Public Note")]
    pub public_note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gauge_decodes_with_missing_optionals() {
        let gauge: GaugeRecord = serde_json::from_value(json!({ "id": "0xabc" })).unwrap();
        assert_eq!(gauge.pool_id, None);
        assert_eq!(gauge.pool_address(), None);

        let gauge: GaugeRecord = serde_json::from_value(json!({
            "id": "0xabc",
            "poolId": "0xpool",
            "isKilled": false,
            "pool": { "address": null }
        }))
        .unwrap();
        assert_eq!(gauge.pool_id.as_deref(), Some("0xpool"));
        assert_eq!(gauge.is_killed, Some(false));
        assert_eq!(gauge.pool_address(), None);
    }

    #[test]
    fn test_descriptor_uses_registry_columns() {
        let record = DescriptorRecord {
            contract_address: "eip155:10:0xabc".to_string(),
            public_name_tag: "Pool Gauge — X".to_string(),
            project_name: "Balancer".to_string(),
            ui_website_link: "https://balancer.fi".to_string(),
            public_note: "note".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Contract Address"], "eip155:10:0xabc");
        assert_eq!(value["UI/Website Link"], "https://balancer.fi");
    }

    #[test]
    fn test_zero_address_sorts_first() {
        assert!(ZERO_ADDRESS < "0x0000000000000000000000000000000000000001");
        assert!(ZERO_ADDRESS < "0xA");
    }
}
