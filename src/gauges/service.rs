/// Tag pipeline entry point
///
/// `Start -> Resolved -> Pinned -> GaugesPaged -> MetadataPaged -> Joined -> Done`
///
/// Any failure aborts the request with the originating error; there is no
/// partial result.
use super::paginator::paginate_all;
use super::partitions::PartitionResolver;
use super::queries::{GaugeFeed, PoolFeed};
use super::snapshot::pin_snapshot;
use super::transform::{build_descriptors, PoolLookup, TagSettings};
use super::types::DescriptorRecord;
use crate::apis::subgraph::GraphTransport;
use crate::config::Config;
use crate::errors::{FeedKind, TagError, TagResult};
use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Instant;

/// Pipeline states, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStage {
    Start,
    Resolved,
    Pinned,
    GaugesPaged,
    MetadataPaged,
    Joined,
    Done,
}

impl TagStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStage::Start => "start",
            TagStage::Resolved => "resolved",
            TagStage::Pinned => "pinned",
            TagStage::GaugesPaged => "gauges_paged",
            TagStage::MetadataPaged => "metadata_paged",
            TagStage::Joined => "joined",
            TagStage::Done => "done",
        }
    }
}

fn enter(stage: TagStage, detail: &str) {
    logger::debug(LogTag::Tags, &format!("-> {} ({})", stage.as_str(), detail));
}

pub struct TagService {
    transport: Arc<dyn GraphTransport>,
    resolver: PartitionResolver,
    page_size: usize,
    settings: TagSettings,
}

impl TagService {
    pub fn new(
        transport: Arc<dyn GraphTransport>,
        resolver: PartitionResolver,
        page_size: usize,
        settings: TagSettings,
    ) -> TagResult<Self> {
        if page_size == 0 {
            return Err(TagError::Config(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            transport,
            resolver,
            page_size,
            settings,
        })
    }

    pub fn from_config(config: &Config, transport: Arc<dyn GraphTransport>) -> TagResult<Self> {
        config.validate()?;
        Self::new(
            transport,
            PartitionResolver::from_config(config),
            config.query.page_size,
            TagSettings::from(&config.tags),
        )
    }

    /// Build the deduplicated descriptor list for one chain at a consistent snapshot
    pub async fn return_tags(
        &self,
        chain_id: &str,
        api_key: &str,
    ) -> TagResult<Vec<DescriptorRecord>> {
        let started = Instant::now();
        enter(TagStage::Start, chain_id);

        let endpoints = self.resolver.resolve(chain_id, api_key)?;
        enter(TagStage::Resolved, &endpoints.chain_id);

        let transport = self.transport.as_ref();
        let snapshot = pin_snapshot(
            transport,
            &[
                (FeedKind::Gauges, endpoints.gauges.as_str()),
                (FeedKind::Meta, endpoints.pools.as_str()),
            ],
        )
        .await?;
        enter(TagStage::Pinned, &format!("block {}", snapshot.block()));

        let gauges = paginate_all(
            &GaugeFeed::new(transport, &endpoints.gauges),
            snapshot,
            self.page_size,
        )
        .await?;
        enter(TagStage::GaugesPaged, &format!("{} gauges", gauges.len()));

        let pools = PoolLookup::from_records(
            paginate_all(
                &PoolFeed::new(transport, &endpoints.pools),
                snapshot,
                self.page_size,
            )
            .await?,
        );
        enter(TagStage::MetadataPaged, &format!("{} pools", pools.len()));

        let records = build_descriptors(&endpoints.chain_id, &gauges, &pools, &self.settings);
        enter(
            TagStage::Joined,
            &format!("{} of {} gauges tagged", records.len(), gauges.len()),
        );

        logger::info(
            LogTag::Tags,
            &format!(
                "Chain {}: {} tags at block {} in {}ms",
                endpoints.chain_id,
                records.len(),
                snapshot.block(),
                started.elapsed().as_millis()
            ),
        );
        enter(TagStage::Done, &endpoints.chain_id);
        Ok(records)
    }
}
