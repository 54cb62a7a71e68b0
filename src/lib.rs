//! Address tags for Balancer liquidity gauges
//!
//! Pins a gauge subgraph and a pool metadata subgraph to one indexed block,
//! pages both to exhaustion, joins gauges to their pools and returns one
//! descriptor record per live gauge.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use gaugetags::apis::SubgraphClient;
//! use gaugetags::config::Config;
//! use gaugetags::gauges::TagService;
//!
//! # async fn run() -> Result<(), gaugetags::errors::TagError> {
//! let config = Config::default();
//! let client = SubgraphClient::new(Duration::from_secs(config.query.timeout_secs))?;
//! let service = TagService::from_config(&config, Arc::new(client))?;
//! let tags = service.return_tags("10", "my-api-key").await?;
//! println!("{} tags", tags.len());
//! # Ok(())
//! # }
//! ```

pub mod apis;
pub mod config;
pub mod errors;
pub mod gauges;
pub mod logger;
