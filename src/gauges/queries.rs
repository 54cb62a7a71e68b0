/// Subgraph query documents and the two paged feeds built on them
use super::paginator::PageSource;
use super::types::{GaugeRecord, PoolMetadata, SnapshotMarker};
use crate::apis::subgraph::{execute_query, GraphRequest, GraphTransport};
use crate::errors::{FeedKind, TagResult};
use async_trait::async_trait;
use serde::Deserialize;

pub const INDEXED_BLOCK_OPERATION: &str = "IndexedBlock";
pub const LIQUIDITY_GAUGES_OPERATION: &str = "LiquidityGauges";
pub const POOLS_OPERATION: &str = "Pools";

pub const INDEXED_BLOCK_QUERY: &str = r#"
query IndexedBlock {
  _meta {
    block {
      number
    }
  }
}
"#;

/// Live gauges only: the service drops gauges without a pool id and killed gauges
pub const LIQUIDITY_GAUGES_QUERY: &str = r#"
query LiquidityGauges($lastId: ID!, $block: Int!, $first: Int!) {
  liquidityGauges(
    first: $first
    orderBy: id
    orderDirection: asc
    block: { number: $block }
    where: { id_gt: $lastId, poolId_not: null, isKilled: false }
  ) {
    id
    poolId
    isKilled
    pool {
      address
    }
  }
}
"#;

pub const POOLS_QUERY: &str = r#"
query Pools($lastId: ID!, $block: Int!, $first: Int!) {
  pools(
    first: $first
    orderBy: id
    orderDirection: asc
    block: { number: $block }
    where: { id_gt: $lastId }
  ) {
    id
    name
    symbol
    address
    poolType
  }
}
"#;

/// Variables shared by both page queries
pub fn page_request(
    operation: &str,
    query: &str,
    cursor: &str,
    snapshot: SnapshotMarker,
    page_size: usize,
) -> GraphRequest {
    GraphRequest::new(operation, query)
        .with_variable("lastId", cursor)
        .with_variable("block", snapshot.block())
        .with_variable("first", page_size as u64)
}

// The collection key is required: a page without it is a decode failure,
// never an empty page.
#[derive(Debug, Deserialize)]
struct LiquidityGaugesPage {
    #[serde(rename = "liquidityGauges")]
    liquidity_gauges: Vec<GaugeRecord>,
}

#[derive(Debug, Deserialize)]
struct PoolsPage {
    pools: Vec<PoolMetadata>,
}

/// Paged liquidity gauge feed
pub struct GaugeFeed<'a> {
    transport: &'a dyn GraphTransport,
    endpoint: &'a str,
}

impl<'a> GaugeFeed<'a> {
    pub fn new(transport: &'a dyn GraphTransport, endpoint: &'a str) -> Self {
        Self {
            transport,
            endpoint,
        }
    }
}

#[async_trait]
impl PageSource for GaugeFeed<'_> {
    type Record = GaugeRecord;

    fn feed(&self) -> FeedKind {
        FeedKind::Gauges
    }

    async fn fetch_page(
        &self,
        cursor: &str,
        snapshot: SnapshotMarker,
        page_size: usize,
    ) -> TagResult<Vec<GaugeRecord>> {
        let request = page_request(
            LIQUIDITY_GAUGES_OPERATION,
            LIQUIDITY_GAUGES_QUERY,
            cursor,
            snapshot,
            page_size,
        );
        let page: LiquidityGaugesPage =
            execute_query(self.transport, FeedKind::Gauges, self.endpoint, &request).await?;
        Ok(page.liquidity_gauges)
    }
}

/// Paged pool metadata feed
pub struct PoolFeed<'a> {
    transport: &'a dyn GraphTransport,
    endpoint: &'a str,
}

impl<'a> PoolFeed<'a> {
    pub fn new(transport: &'a dyn GraphTransport, endpoint: &'a str) -> Self {
        Self {
            transport,
            endpoint,
        }
    }
}

#[async_trait]
impl PageSource for PoolFeed<'_> {
    type Record = PoolMetadata;

    fn feed(&self) -> FeedKind {
        FeedKind::Meta
    }

    async fn fetch_page(
        &self,
        cursor: &str,
        snapshot: SnapshotMarker,
        page_size: usize,
    ) -> TagResult<Vec<PoolMetadata>> {
        let request = page_request(POOLS_OPERATION, POOLS_QUERY, cursor, snapshot, page_size);
        let page: PoolsPage =
            execute_query(self.transport, FeedKind::Meta, self.endpoint, &request).await?;
        Ok(page.pools)
    }
}
