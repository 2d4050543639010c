use common_utils::{errors::CustomResult, request::Request};
use domain_types::{errors::ApiClientError, router_response_types::Response};

/// Sends a built request to the connector.
///
/// `Ok(Err(response))` carries a non-2xx answer; `Err` means no usable
/// answer came back at all. Retries and timeouts belong to the implementor.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn send(&self, request: Request)
        -> CustomResult<Result<Response, Response>, ApiClientError>;
}
