//! Per-flow request construction and response handling.

use common_utils::{
    consts,
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    errors::ConnectorError, router_data_v2::RouterDataV2, router_response_types::Response,
    types::Connectors,
};
use hyperswitch_masking::Maskable;

use crate::api::ConnectorCommon;

/// Integration of one flow of a connector.
///
/// Every method has a default so that a connector only overrides what the
/// flow needs. A flow the connector cannot serve overrides
/// [`ConnectorIntegrationV2::build_request_v2`] to return an error.
pub trait ConnectorIntegrationV2<Flow, ResourceCommonData, Req, Resp>:
    ConnectorCommon + Sync
{
    /// returns a vec of tuple of header key and value
    fn get_headers(
        &self,
        _req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(vec![(
            consts::CONTENT_TYPE.to_string(),
            self.get_content_type().to_string().into(),
        )])
    }

    /// returns content type
    fn get_content_type(&self) -> &'static str {
        self.common_get_content_type()
    }

    /// primarily used when creating signature based on request method of payment flow
    fn get_http_method(&self) -> Method {
        Method::Post
    }

    /// returns url
    fn get_url(
        &self,
        _req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<String, ConnectorError> {
        Err(ConnectorError::FailedToObtainIntegrationUrl.into())
    }

    /// returns request body
    fn get_request_body(
        &self,
        _req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        Ok(None)
    }

    /// builds the request to be sent to the connector
    fn build_request_v2(
        &self,
        req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(self.get_http_method())
                .url(self.get_url(req, connectors)?.as_str())
                .headers(self.get_headers(req)?)
                .set_optional_body(self.get_request_body(req)?)
                .build(),
        ))
    }

    /// accepts the raw api response and decodes it
    fn handle_response_v2(
        &self,
        _data: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
        _res: Response,
    ) -> CustomResult<RouterDataV2<Flow, ResourceCommonData, Req, Resp>, ConnectorError> {
        Err(ConnectorError::NotImplemented(format!("{} response handling", self.id())).into())
    }
}
