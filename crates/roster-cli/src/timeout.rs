//! Request timeout for the mapping service.
//!
//! The wizard never times out on its own; the host decides how long to wait.

use std::time::Duration;

use roster_service::{MappingRequest, MappingResponse, MappingService, ServiceError};

/// Wraps a mapping service, failing requests that take longer than `timeout`.
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutService<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: MappingService + Sync> MappingService for TimeoutService<S> {
    async fn suggest(&self, request: &MappingRequest) -> roster_service::Result<MappingResponse> {
        match tokio::time::timeout(self.timeout, self.inner.suggest(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Mapping request timed out");
                Err(ServiceError::Network(format!(
                    "no response within {} seconds",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowService;

    impl MappingService for SlowService {
        async fn suggest(
            &self,
            _request: &MappingRequest,
        ) -> roster_service::Result<MappingResponse> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(MappingResponse::default())
        }
    }

    fn request() -> MappingRequest {
        MappingRequest {
            headers: vec!["Student".to_string()],
            sample_rows: vec![],
            source_hint: None,
        }
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let service = TimeoutService::new(SlowService, Duration::from_millis(20));
        let err = service.suggest(&request()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Network(_)));
        assert!(err.is_retryable());
    }
}
