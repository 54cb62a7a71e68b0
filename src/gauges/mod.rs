/// Snapshot-consistent gauge tag pipeline
///
/// - `partitions`: chain id and API key -> endpoint pair
/// - `snapshot`: pin both subgraphs to one indexed block
/// - `paginator`: page a feed to exhaustion at that block
/// - `transform`: join gauges to pool metadata, dedup, build descriptors
/// - `service`: sequences the above per request
pub mod paginator;
pub mod partitions;
pub mod queries;
pub mod service;
pub mod snapshot;
pub mod transform;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use paginator::{paginate_all, PageCursor, PageSource, PageStep, DEFAULT_PAGE_SIZE};
pub use partitions::{PartitionResolver, ResolvedEndpoints};
pub use queries::{GaugeFeed, PoolFeed};
pub use service::{TagService, TagStage};
pub use snapshot::{fetch_indexed_block, pin_snapshot};
pub use transform::{build_descriptors, truncate_label, PoolLookup, TagSettings};
pub use types::{
    CursorKey, DescriptorRecord, GaugePool, GaugeRecord, PoolMetadata, SnapshotMarker,
    ZERO_ADDRESS,
};
