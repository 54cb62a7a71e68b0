/// Subgraph query client
///
/// Issues one GraphQL-over-HTTP request per call and maps every failure mode
/// to a typed [`TagError`]:
/// - elapsed timeout -> `Timeout`
/// - non-2xx status -> `Transport`
/// - connection failure without a status -> `Network`
/// - `errors` in the payload -> `RemoteQuery`
///
/// No retries happen at this layer.
pub mod types;

pub use self::types::{GraphErrorEntry, GraphRequest, RawGraphResponse};

use crate::apis::client::HttpClient;
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::errors::{FeedKind, TagError, TagResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Maximum number of response body characters kept in transport errors
const ERROR_BODY_LIMIT: usize = 300;

/// Transport seam between the pipeline and the remote service
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Send one request and return the undecoded response envelope
    async fn post(
        &self,
        feed: FeedKind,
        endpoint: &str,
        request: &GraphRequest,
    ) -> TagResult<RawGraphResponse>;
}

/// Issue `request` and decode its `data` into `T`
pub async fn execute_query<T>(
    transport: &dyn GraphTransport,
    feed: FeedKind,
    endpoint: &str,
    request: &GraphRequest,
) -> TagResult<T>
where
    T: DeserializeOwned,
{
    transport
        .post(feed, endpoint, request)
        .await?
        .into_data(feed)
}

/// Endpoint host for logging; endpoints embed the API key in their path
pub fn redact_endpoint(endpoint: &str) -> String {
    url::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid endpoint>".to_string())
}

/// reqwest-backed [`GraphTransport`] with stats tracking
pub struct SubgraphClient {
    http: HttpClient,
    stats: ApiStatsTracker,
}

impl SubgraphClient {
    pub fn new(timeout: Duration) -> TagResult<Self> {
        Ok(Self {
            http: HttpClient::new(timeout)?,
            stats: ApiStatsTracker::new(),
        })
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }

    fn timeout_error(&self, feed: FeedKind) -> TagError {
        TagError::Timeout {
            feed,
            timeout_ms: self.http.timeout().as_millis() as u64,
        }
    }

    async fn record_failure(&self, elapsed_ms: f64, error: &TagError) {
        self.stats.record_request(false, elapsed_ms).await;
        self.stats.record_error(error.to_string()).await;
    }
}

#[async_trait]
impl GraphTransport for SubgraphClient {
    async fn post(
        &self,
        feed: FeedKind,
        endpoint: &str,
        request: &GraphRequest,
    ) -> TagResult<RawGraphResponse> {
        logger::debug(
            LogTag::Api,
            &format!(
                "[{}] {} -> {}",
                feed,
                request.operation_name,
                redact_endpoint(endpoint)
            ),
        );

        let start = Instant::now();
        let exchange = async {
            let response = self.http.client().post(endpoint).json(request).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };
        let outcome = tokio::time::timeout(self.http.timeout(), exchange).await;
        let elapsed_ms = start.elapsed().as_millis() as f64;

        let (status, body) = match outcome {
            Err(_) => {
                let err = self.timeout_error(feed);
                self.record_failure(elapsed_ms, &err).await;
                return Err(err);
            }
            Ok(Err(e)) => {
                let err = if e.is_timeout() {
                    self.timeout_error(feed)
                } else if let Some(status) = e.status() {
                    TagError::Transport {
                        feed,
                        status: status.as_u16(),
                        body: String::new(),
                    }
                } else {
                    TagError::Network {
                        feed,
                        reason: e.to_string(),
                    }
                };
                self.record_failure(elapsed_ms, &err).await;
                return Err(err);
            }
            Ok(Ok(exchange)) => exchange,
        };

        if !status.is_success() {
            let err = TagError::Transport {
                feed,
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            };
            self.record_failure(elapsed_ms, &err).await;
            return Err(err);
        }

        match serde_json::from_str::<RawGraphResponse>(&body) {
            Ok(response) => {
                // GraphQL errors arrive with a 2xx status but still count as failures
                match response.remote_error(feed) {
                    Some(err) => self.record_failure(elapsed_ms, &err).await,
                    None => self.stats.record_request(true, elapsed_ms).await,
                }
                logger::verbose(
                    LogTag::Api,
                    &format!(
                        "[{}] {} answered in {:.0}ms ({} bytes)",
                        feed,
                        request.operation_name,
                        elapsed_ms,
                        body.len()
                    ),
                );
                Ok(response)
            }
            Err(e) => {
                let err = TagError::Decode {
                    feed,
                    reason: format!("invalid response envelope: {}", e),
                };
                self.record_failure(elapsed_ms, &err).await;
                Err(err)
            }
        }
    }
}
