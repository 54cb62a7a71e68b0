//! In-memory transport doubles shared by the pipeline tests
use super::queries::{INDEXED_BLOCK_OPERATION, LIQUIDITY_GAUGES_OPERATION, POOLS_OPERATION};
use crate::apis::subgraph::{GraphRequest, GraphTransport, RawGraphResponse};
use crate::errors::{FeedKind, TagError, TagResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

type Handler = Box<dyn Fn(FeedKind, &str, &GraphRequest) -> TagResult<RawGraphResponse> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub feed: FeedKind,
    pub endpoint: String,
    pub operation: String,
    pub last_id: Option<String>,
    pub block: Option<u64>,
}

/// Transport that answers through a closure and records every call
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(FeedKind, &str, &GraphRequest) -> TagResult<RawGraphResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Route every call through a fake subgraph pair
    pub fn serving(fake: FakeSubgraph) -> Self {
        Self::new(move |feed, _, request| fake.answer(feed, request))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }
}

#[async_trait]
impl GraphTransport for MockTransport {
    async fn post(
        &self,
        feed: FeedKind,
        endpoint: &str,
        request: &GraphRequest,
    ) -> TagResult<RawGraphResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            feed,
            endpoint: endpoint.to_string(),
            operation: request.operation_name.clone(),
            last_id: request.variable_str("lastId").map(str::to_string),
            block: request.variable_u64("block"),
        });
        (self.handler)(feed, endpoint, request)
    }
}

/// Gauge and pool subgraphs held in memory
///
/// Page queries honor `id_gt` and `first` but keep stored order, so tests can
/// feed unsorted or duplicated rows exactly as a misbehaving service would.
#[derive(Debug, Clone)]
pub struct FakeSubgraph {
    pub gauges_block: u64,
    pub meta_block: u64,
    pub gauges: Vec<Value>,
    pub pools: Vec<Value>,
}

impl FakeSubgraph {
    pub fn new(block: u64) -> Self {
        Self {
            gauges_block: block,
            meta_block: block,
            gauges: Vec::new(),
            pools: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, gauges_block: u64, meta_block: u64) -> Self {
        self.gauges_block = gauges_block;
        self.meta_block = meta_block;
        self
    }

    pub fn with_gauges(mut self, gauges: Vec<Value>) -> Self {
        self.gauges = gauges;
        self
    }

    pub fn with_pools(mut self, pools: Vec<Value>) -> Self {
        self.pools = pools;
        self
    }

    pub fn answer(&self, feed: FeedKind, request: &GraphRequest) -> TagResult<RawGraphResponse> {
        match request.operation_name.as_str() {
            INDEXED_BLOCK_OPERATION => {
                let block = match feed {
                    FeedKind::Gauges => self.gauges_block,
                    FeedKind::Meta => self.meta_block,
                };
                Ok(RawGraphResponse::from_data(
                    json!({ "_meta": { "block": { "number": block } } }),
                ))
            }
            LIQUIDITY_GAUGES_OPERATION => Ok(RawGraphResponse::from_data(json!({
                "liquidityGauges": Self::page(&self.gauges, request)
            }))),
            POOLS_OPERATION => Ok(RawGraphResponse::from_data(json!({
                "pools": Self::page(&self.pools, request)
            }))),
            other => Err(TagError::RemoteQuery {
                feed,
                message: format!("unknown operation {}", other),
            }),
        }
    }

    fn page(rows: &[Value], request: &GraphRequest) -> Vec<Value> {
        let last_id = request.variable_str("lastId").unwrap_or_default();
        let first = request.variable_u64("first").unwrap_or(100) as usize;
        rows.iter()
            .filter(|row| row["id"].as_str().unwrap_or_default() > last_id)
            .take(first)
            .cloned()
            .collect()
    }
}
