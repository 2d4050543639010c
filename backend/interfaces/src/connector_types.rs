use common_utils::errors::CustomResult;
use domain_types::{
    connector_flow,
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundsData,
    },
    errors::ConnectorError,
};

use crate::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

/// Every flow a card connector has to answer for, supported or not.
pub trait ConnectorServiceTrait:
    ConnectorCommon + PaymentPurchaseV2 + PaymentAuthorizeV2 + PaymentCapture + PaymentVoidV2 + RefundV2
{
    /// Whether transcripts of this connector's traffic can be scrubbed of card data.
    fn supports_scrubbing(&self) -> bool {
        false
    }

    /// Redacts card data and credentials from a wire transcript.
    fn scrub(&self, _transcript: &str) -> CustomResult<String, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: "Scrubbing".to_string(),
            connector: self.id(),
        }
        .into())
    }
}

pub trait PaymentPurchaseV2:
    ConnectorIntegrationV2<
    connector_flow::Purchase,
    PaymentFlowData,
    PaymentsAuthorizeData,
    PaymentsResponseData,
>
{
}

pub trait PaymentAuthorizeV2:
    ConnectorIntegrationV2<
    connector_flow::Authorize,
    PaymentFlowData,
    PaymentsAuthorizeData,
    PaymentsResponseData,
>
{
}

pub trait PaymentCapture:
    ConnectorIntegrationV2<
    connector_flow::Capture,
    PaymentFlowData,
    PaymentsCaptureData,
    PaymentsResponseData,
>
{
}

pub trait PaymentVoidV2:
    ConnectorIntegrationV2<connector_flow::Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
}

pub trait RefundV2:
    ConnectorIntegrationV2<connector_flow::Refund, PaymentFlowData, RefundsData, PaymentsResponseData>
{
}
