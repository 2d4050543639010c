pub mod constants;
pub mod gateway;
pub mod transformers;


use common_utils::{
    errors::CustomResult,
    request::{Request, RequestContent},
    types::{AmountConvertor, StringMinorUnit, StringMinorUnitForConnector},
};
use domain_types::{
    connector_flow::{Authorize, Capture, FlowName, Purchase, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundsData,
    },
    errors,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
};
use transformers::{self as zgate, ZgatePaymentsRequest, ZgateRouterData};

use crate::utils;

#[derive(Clone)]
pub struct Zgate {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMinorUnit> + Sync),
}

impl Zgate {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMinorUnitForConnector,
        }
    }
}

impl ConnectorCommon for Zgate {
    fn id(&self) -> &'static str {
        "zgate"
    }

    fn common_get_content_type(&self) -> &'static str {
        constants::CONTENT_TYPE
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.zgate.base_url.as_ref()
    }
}

impl connector_types::ConnectorServiceTrait for Zgate {}
impl connector_types::PaymentPurchaseV2 for Zgate {}
impl connector_types::PaymentAuthorizeV2 for Zgate {}
impl connector_types::PaymentCapture for Zgate {}
impl connector_types::PaymentVoidV2 for Zgate {}
impl connector_types::RefundV2 for Zgate {}

impl ConnectorIntegrationV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Zgate
{
    fn get_url(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let base_url = connectors
            .zgate
            .base_url_for(req.resource_common_data.test_mode)
            .ok_or(errors::ConnectorError::InvalidConnectorConfig {
                config: "connectors.zgate.test_base_url",
            })?;
        Ok(format!("{base_url}{}", constants::TRANSACTION_INIT_ENDPOINT))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let currency = req
            .request
            .currency_or(req.resource_common_data.default_currency);
        let amount =
            utils::convert_amount(self.amount_converter, req.request.minor_amount, currency)?;
        let connector_router_data = ZgateRouterData::from((amount, req));
        let connector_req = ZgatePaymentsRequest::try_from(&connector_router_data)?;
        let body = serde_json::to_value(&connector_req)
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;
        Ok(Some(RequestContent::Json(body)))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        let response = zgate::interpret_response(
            &res.response,
            constants::TRANSACTION_INIT_ACTION,
            data.resource_common_data.test_mode,
        )?;
        tracing::info!(
            success = response.success,
            error_code = ?response.error_code,
            "zgate transaction interpreted"
        );
        Ok(data.clone().set_response(Ok(response)))
    }
}

/// Flows Zgate accepts parameters for but does not carry out. The request is
/// refused before anything reaches the network.
macro_rules! not_implemented_flow {
    ($flow:ident, $flow_request:ty, $flow_name:expr) => {
        impl ConnectorIntegrationV2<$flow, PaymentFlowData, $flow_request, PaymentsResponseData>
            for Zgate
        {
            fn build_request_v2(
                &self,
                _req: &RouterDataV2<$flow, PaymentFlowData, $flow_request, PaymentsResponseData>,
                _connectors: &Connectors,
            ) -> CustomResult<Option<Request>, errors::ConnectorError> {
                Err(errors::ConnectorError::NotImplemented(format!(
                    "{} for {}",
                    $flow_name,
                    self.id()
                ))
                .into())
            }
        }
    };
}

not_implemented_flow!(Authorize, PaymentsAuthorizeData, FlowName::Authorize);
not_implemented_flow!(Capture, PaymentsCaptureData, FlowName::Capture);
not_implemented_flow!(Void, PaymentVoidData, FlowName::Void);
not_implemented_flow!(Refund, RefundsData, FlowName::Refund);
