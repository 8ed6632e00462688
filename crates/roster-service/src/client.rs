//! Mapping service trait and its HTTP client.

use std::future::Future;

use reqwest::StatusCode;

use crate::error::{Result, ServiceError};
use crate::types::{MappingRequest, MappingResponse};

/// User agent string for service requests.
const USER_AGENT_VALUE: &str = concat!("roster-import/", env!("CARGO_PKG_VERSION"));

/// Proposes a column mapping for an upload.
///
/// The call is the wizard's only suspension point. Implementations apply no
/// timeout of their own; hosts that need one wrap the future.
pub trait MappingService {
    /// Requests a mapping suggestion for the given headers and sample rows.
    fn suggest(
        &self,
        request: &MappingRequest,
    ) -> impl Future<Output = Result<MappingResponse>> + Send;
}

/// Mapping service reached over HTTP with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpMappingService {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpMappingService {
    /// Creates a client for `endpoint`.
    ///
    /// A missing token is not an error here; requests fail with
    /// [`ServiceError::NotAuthenticated`] before anything is sent.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ServiceError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Handles the HTTP response, checking for errors and parsing JSON.
    async fn handle_response(response: reqwest::Response) -> Result<MappingResponse> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ServiceError::NotAuthenticated);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl MappingService for HttpMappingService {
    async fn suggest(&self, request: &MappingRequest) -> Result<MappingResponse> {
        let Some(token) = self.token() else {
            tracing::warn!("No credential available, skipping mapping request");
            return Err(ServiceError::NotAuthenticated);
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            columns = request.headers.len(),
            samples = request.sample_rows.len(),
            "Requesting mapping suggestion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let suggestion = Self::handle_response(response).await?;

        tracing::info!(
            mappings = suggestion.mappings.len(),
            targets = suggestion.target_fields.len(),
            detected_source = ?suggestion.detected_source,
            "Received mapping suggestion"
        );
        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpMappingService::new("https://example.com/mapping", None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let client =
            HttpMappingService::new("https://example.com/mapping", Some("  ".to_string())).unwrap();
        assert!(client.token().is_none());
    }
}
