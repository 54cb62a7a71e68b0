/// Join gauges to pool metadata and build descriptor records
///
/// Pure: no I/O. Output keeps gauge input order minus skipped records.
use super::types::{DescriptorRecord, GaugeRecord, PoolMetadata};
use crate::config::{TagConfig, ELLIPSIS};
use std::collections::{HashMap, HashSet};

const NAME_TAG_PREFIX: &str = "Pool Gauge — ";

/// Fixed output fields and limits
#[derive(Debug, Clone, PartialEq)]
pub struct TagSettings {
    pub address_scheme: String,
    pub project_name: String,
    pub website: String,
    pub max_name_tag_len: usize,
}

impl From<&TagConfig> for TagSettings {
    fn from(config: &TagConfig) -> Self {
        Self {
            address_scheme: config.address_scheme.clone(),
            project_name: config.project_name.clone(),
            website: config.website.clone(),
            max_name_tag_len: config.max_name_tag_len,
        }
    }
}

impl Default for TagSettings {
    fn default() -> Self {
        Self::from(&TagConfig::default())
    }
}

/// Pool metadata keyed by lower-cased pool id
///
/// Ids are normalized once here; lookups normalize the queried id the same way.
#[derive(Debug, Clone, Default)]
pub struct PoolLookup {
    by_id: HashMap<String, PoolMetadata>,
}

impl PoolLookup {
    /// Index pools; the first record wins when an id repeats
    pub fn from_records(pools: Vec<PoolMetadata>) -> Self {
        let mut by_id = HashMap::with_capacity(pools.len());
        for pool in pools {
            by_id.entry(pool.id.to_lowercase()).or_insert(pool);
        }
        Self { by_id }
    }

    pub fn get(&self, pool_id: &str) -> Option<&PoolMetadata> {
        self.by_id.get(&pool_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Truncate to `max_len` characters, ending in `...` when shortened
pub fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        return label.to_string();
    }
    if max_len <= ELLIPSIS.len() {
        return label.chars().take(max_len).collect();
    }

    let kept: String = label.chars().take(max_len - ELLIPSIS.len()).collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

fn public_note(pool: &PoolMetadata, project_name: &str) -> String {
    let symbol = pool
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unnamed");

    match pool.pool_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(pool_type) => format!(
            "Liquidity gauge for the {} {} pool on {}.",
            symbol, pool_type, project_name
        ),
        None => format!("Liquidity gauge for the {} pool on {}.", symbol, project_name),
    }
}

/// Build one descriptor per live, resolvable, first-seen gauge
pub fn build_descriptors(
    chain_id: &str,
    gauges: &[GaugeRecord],
    pools: &PoolLookup,
    settings: &TagSettings,
) -> Vec<DescriptorRecord> {
    let mut emitted: HashSet<String> = HashSet::with_capacity(gauges.len());
    let mut records = Vec::with_capacity(gauges.len());

    for gauge in gauges {
        let gauge_key = gauge.id.to_lowercase();
        if emitted.contains(&gauge_key) {
            continue;
        }

        let Some(pool) = gauge.pool_id.as_deref().and_then(|id| pools.get(id)) else {
            continue;
        };
        // A tag without a name is worse than no tag
        let Some(pool_name) = pool.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            continue;
        };

        records.push(DescriptorRecord {
            contract_address: format!("{}:{}:{}", settings.address_scheme, chain_id, gauge.id),
            public_name_tag: truncate_label(
                &format!("{}{}", NAME_TAG_PREFIX, pool_name),
                settings.max_name_tag_len,
            ),
            project_name: settings.project_name.clone(),
            ui_website_link: settings.website.clone(),
            public_note: public_note(pool, &settings.project_name),
        });
        emitted.insert(gauge_key);
    }

    records
}
