/// Base HTTP client shared by subgraph requests
use crate::errors::{TagError, TagResult};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("gaugetags/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with a fixed per-request timeout
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> TagResult<Self> {
        if timeout.is_zero() {
            return Err(TagError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TagError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(HttpClient::new(Duration::ZERO).is_err());
    }

    #[test]
    fn test_timeout_is_kept() {
        let client = HttpClient::new(Duration::from_secs(30)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }
}
