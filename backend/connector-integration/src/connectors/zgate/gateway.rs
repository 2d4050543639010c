use std::sync::Arc;

use common_enums::Currency;
use common_utils::{errors::CustomResult, types::MinorUnit};
use domain_types::{
    connector_flow::{Authorize, Capture, FlowName, Purchase, Refund, Void},
    connector_types::{
        PayerDetails, PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsResponseData, RefundsData,
    },
    errors::ConnectorError,
    payment_method_data::PaymentMethodData,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    types::{Connectors, MerchantSettings},
};
use error_stack::{report, ResultExt};
use external_services::{configs::Config, execute_connector_processing_step, HttpClient};
use hyperswitch_masking::Secret;
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2,
    connector_types::ConnectorServiceTrait, transport::ConnectorTransport,
};

use super::{
    transformers::{ZgateAuthType, ZgateAuthorization},
    Zgate,
};
use crate::utils::required;

/// Caller supplied details of a purchase.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOptions {
    /// `None` selects the merchant's default currency
    pub currency: Option<Currency>,
    /// Correlation id echoed back by Zgate in `custom`
    pub order_id: String,
    pub return_url: Option<String>,
    pub description: Option<String>,
    pub save_card: bool,
    pub payer: PayerDetails,
}

/// Public operation surface of the Zgate adapter.
///
/// Holds the merchant credentials for its whole lifetime and nothing else
/// that changes, so one instance can serve concurrent calls.
pub struct ZgateGateway {
    connector: &'static Zgate,
    auth_type: ConnectorAuthType,
    connectors: Connectors,
    default_currency: Currency,
    test_mode: bool,
    transport: Arc<dyn ConnectorTransport>,
}

impl std::fmt::Debug for ZgateGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZgateGateway")
            .field("auth_type", &self.auth_type.get_masked_keys())
            .field("connectors", &self.connectors)
            .field("default_currency", &self.default_currency)
            .field("test_mode", &self.test_mode)
            .finish_non_exhaustive()
    }
}

impl ZgateGateway {
    /// Fails when the merchant id or key is missing, or when test mode is
    /// selected without a test endpoint.
    pub fn new(
        merchant: MerchantSettings,
        connectors: Connectors,
        transport: Arc<dyn ConnectorTransport>,
    ) -> CustomResult<Self, ConnectorError> {
        let auth_type = ConnectorAuthType::BodyKey {
            api_key: Secret::new(required(merchant.merchant_id, "merchant_id")?),
            key1: required(merchant.merchant_key, "merchant_key")?,
        };
        ZgateAuthType::try_from(&auth_type)?;
        if connectors.zgate.base_url_for(merchant.test_mode).is_none() {
            return Err(report!(ConnectorError::InvalidConnectorConfig {
                config: "connectors.zgate.test_base_url",
            })
            .attach_printable("test mode requires a test endpoint"));
        }

        Ok(Self {
            connector: Zgate::new(),
            auth_type,
            connectors,
            default_currency: merchant.default_currency,
            test_mode: merchant.test_mode,
            transport,
        })
    }

    /// Gateway talking HTTP through the proxy settings of `config`.
    pub fn from_config(config: &Config) -> CustomResult<Self, ConnectorError> {
        let transport = HttpClient::new(&config.proxy)
            .change_context(ConnectorError::InvalidConnectorConfig { config: "proxy" })?;
        Self::new(
            config.merchant.clone(),
            config.connectors.clone(),
            Arc::new(transport),
        )
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    fn flow_data(&self, connector_request_reference_id: String) -> PaymentFlowData {
        PaymentFlowData {
            connector_request_reference_id,
            default_currency: self.default_currency,
            test_mode: self.test_mode,
        }
    }

    async fn execute<F, Req>(
        &self,
        request: Req,
        connector_request_reference_id: String,
        flow: FlowName,
    ) -> CustomResult<PaymentsResponseData, ConnectorError>
    where
        Zgate: ConnectorIntegrationV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    {
        let router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData> =
            RouterDataV2::new(
                self.flow_data(connector_request_reference_id),
                self.auth_type.clone(),
                request,
            );
        let router_data = execute_connector_processing_step(
            self.transport.as_ref(),
            self.connector,
            router_data,
            &self.connectors,
            flow,
        )
        .await?;

        router_data.response.map_err(|error| {
            report!(ConnectorError::ResponseHandlingFailed).attach_printable(format!(
                "{flow} ended without a response: {}",
                error.message
            ))
        })
    }

    fn authorize_data(
        amount: MinorUnit,
        payment_source: PaymentMethodData,
        options: PurchaseOptions,
    ) -> PaymentsAuthorizeData {
        PaymentsAuthorizeData {
            minor_amount: amount,
            currency: options.currency,
            payment_method_data: payment_source,
            router_return_url: options.return_url,
            description: options.description,
            save_card: options.save_card,
            payer: options.payer,
        }
    }

    /// Charges `payment_source` in one step.
    ///
    /// A declined transaction is a successful call: inspect
    /// [`PaymentsResponseData::success`].
    pub async fn purchase(
        &self,
        amount: MinorUnit,
        payment_source: PaymentMethodData,
        options: PurchaseOptions,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let order_id = options.order_id.clone();
        self.execute::<Purchase, _>(
            Self::authorize_data(amount, payment_source, options),
            order_id,
            FlowName::Purchase,
        )
        .await
    }

    pub async fn authorize(
        &self,
        amount: MinorUnit,
        payment_source: PaymentMethodData,
        options: PurchaseOptions,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let order_id = options.order_id.clone();
        self.execute::<Authorize, _>(
            Self::authorize_data(amount, payment_source, options),
            order_id,
            FlowName::Authorize,
        )
        .await
    }

    pub async fn capture(
        &self,
        amount: MinorUnit,
        authorization: &str,
        currency: Option<Currency>,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let authorization: ZgateAuthorization = authorization.parse()?;
        let request = PaymentsCaptureData {
            minor_amount_to_capture: amount,
            currency: currency.unwrap_or(self.default_currency),
            connector_transaction_id: authorization.to_string(),
        };
        self.execute::<Capture, _>(request, authorization.transaction_id, FlowName::Capture)
            .await
    }

    pub async fn refund(
        &self,
        amount: MinorUnit,
        authorization: &str,
        currency: Option<Currency>,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let authorization: ZgateAuthorization = authorization.parse()?;
        let request = RefundsData {
            minor_refund_amount: amount,
            currency: currency.unwrap_or(self.default_currency),
            connector_transaction_id: authorization.to_string(),
        };
        self.execute::<Refund, _>(request, authorization.transaction_id, FlowName::Refund)
            .await
    }

    pub async fn void(&self, authorization: &str) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let authorization: ZgateAuthorization = authorization.parse()?;
        let request = PaymentVoidData {
            connector_transaction_id: authorization.to_string(),
        };
        self.execute::<Void, _>(request, authorization.transaction_id, FlowName::Void)
            .await
    }

    /// Zgate has no credit operation. Always fails without network traffic.
    pub fn credit(
        &self,
        _amount: MinorUnit,
        _payment_source: &PaymentMethodData,
        _options: &PurchaseOptions,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: FlowName::Credit.to_string(),
            connector: self.connector.id(),
        }
        .into())
    }

    pub fn supports_scrubbing(&self) -> bool {
        self.connector.supports_scrubbing()
    }

    pub fn scrub(&self, transcript: &str) -> CustomResult<String, ConnectorError> {
        self.connector.scrub(transcript)
    }
}
