/// Remote API clients
pub mod client;
pub mod stats;
pub mod subgraph;

pub use client::HttpClient;
pub use stats::{ApiStats, ApiStatsTracker};
pub use subgraph::{execute_query, GraphRequest, GraphTransport, RawGraphResponse, SubgraphClient};
