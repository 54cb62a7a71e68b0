/// Request statistics for remote API clients
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// Point-in-time copy of a client's counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time_ms: f64,
    pub last_error: Option<String>,
    pub last_error_at: Option<DateTime<Utc>>,
}

impl ApiStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.successful_requests as f64 / self.total_requests as f64 * 100.0
    }
}

/// Thread-safe accumulator behind [`ApiStats`]
#[derive(Debug, Default)]
pub struct ApiStatsTracker {
    inner: RwLock<ApiStats>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, success: bool, elapsed_ms: f64) {
        let mut stats = self.inner.write().await;
        let previous = stats.total_requests as f64;
        stats.total_requests += 1;
        if success {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
        stats.average_response_time_ms =
            (stats.average_response_time_ms * previous + elapsed_ms) / stats.total_requests as f64;
    }

    pub async fn record_error(&self, message: String) {
        let mut stats = self.inner.write().await;
        stats.last_error = Some(message);
        stats.last_error_at = Some(Utc::now());
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_running_average_and_counters() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0).await;
        tracker.record_request(false, 300.0).await;
        tracker.record_error("HTTP 502".to_string()).await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert!((stats.average_response_time_ms - 200.0).abs() < f64::EPSILON);
        assert_eq!(stats.last_error.as_deref(), Some("HTTP 502"));
        assert!((stats.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats_success_rate() {
        assert_eq!(ApiStats::default().success_rate(), 0.0);
    }
}
