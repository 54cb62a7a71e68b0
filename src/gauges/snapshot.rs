/// Snapshot pinning across independently indexed subgraphs
///
/// Each subgraph reports the latest block it has indexed. Paging both feeds at
/// the minimum of those blocks gives every page the same point-in-time view,
/// so a pool created after the slower subgraph's head cannot appear on only one
/// side of the join.
use super::queries::{INDEXED_BLOCK_OPERATION, INDEXED_BLOCK_QUERY};
use super::types::SnapshotMarker;
use crate::apis::subgraph::{execute_query, GraphRequest, GraphTransport};
use crate::errors::{FeedKind, TagError, TagResult};
use crate::logger::{self, LogTag};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct MetaResponse {
    #[serde(rename = "_meta", default)]
    meta: Option<MetaBody>,
}

#[derive(Debug, Deserialize)]
struct MetaBody {
    #[serde(default)]
    block: Option<MetaBlock>,
}

#[derive(Debug, Deserialize)]
struct MetaBlock {
    #[serde(default)]
    number: Option<Value>,
}

/// Accepts a JSON integer or a decimal-digit string
fn parse_block_number(feed: FeedKind, value: Option<Value>) -> TagResult<SnapshotMarker> {
    let unavailable = |reason: String| TagError::SnapshotUnavailable { feed, reason };

    match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .map(SnapshotMarker)
            .ok_or_else(|| unavailable(format!("block number {} is not a non-negative integer", number))),
        Some(Value::String(text)) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => text
            .parse::<u64>()
            .map(SnapshotMarker)
            .map_err(|e| unavailable(format!("block number '{}' out of range: {}", text, e))),
        Some(other) => Err(unavailable(format!(
            "block number {} is not an integer",
            other
        ))),
        None => Err(unavailable("response has no _meta.block.number".to_string())),
    }
}

/// Latest block indexed by one subgraph
pub async fn fetch_indexed_block(
    transport: &dyn GraphTransport,
    feed: FeedKind,
    endpoint: &str,
) -> TagResult<SnapshotMarker> {
    let request = GraphRequest::new(INDEXED_BLOCK_OPERATION, INDEXED_BLOCK_QUERY);
    let response: MetaResponse = execute_query(transport, feed, endpoint, &request).await?;

    let number = response
        .meta
        .and_then(|meta| meta.block)
        .and_then(|block| block.number);
    let marker = parse_block_number(feed, number)?;

    logger::debug(
        LogTag::Snapshot,
        &format!("[{}] indexed up to block {}", feed, marker.block()),
    );
    Ok(marker)
}

/// Query every source concurrently and pin to the lowest indexed block
///
/// Fails as a whole if any source fails; there is no partial pin.
pub async fn pin_snapshot(
    transport: &dyn GraphTransport,
    sources: &[(FeedKind, &str)],
) -> TagResult<SnapshotMarker> {
    if sources.is_empty() {
        return Err(TagError::Config(
            "at least one snapshot source is required".to_string(),
        ));
    }

    // Every request runs to completion; the first failure in source order wins
    let markers = join_all(
        sources
            .iter()
            .map(|(feed, endpoint)| fetch_indexed_block(transport, *feed, endpoint)),
    )
    .await
    .into_iter()
    .collect::<TagResult<Vec<_>>>()?;

    let pinned = markers
        .iter()
        .copied()
        .min()
        .ok_or_else(|| TagError::Config("no snapshot markers returned".to_string()))?;

    logger::info(
        LogTag::Snapshot,
        &format!(
            "Pinned snapshot at block {} (sources: {})",
            pinned.block(),
            sources
                .iter()
                .zip(&markers)
                .map(|((feed, _), marker)| format!("{}={}", feed, marker.block()))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    );
    Ok(pinned)
}
