use common_enums::{Currency, StandardErrorCode};
use common_utils::types::MinorUnit;
use serde::Serialize;

use crate::payment_method_data::PaymentMethodData;

/// Data shared by every payment flow of a single call.
#[derive(Debug, Clone, Default)]
pub struct PaymentFlowData {
    /// Caller supplied id used to correlate the connector transaction
    pub connector_request_reference_id: String,
    pub default_currency: Currency,
    pub test_mode: bool,
}

/// Contact details of the payer as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerDetails {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub minor_amount: MinorUnit,
    /// `None` selects the merchant's default currency
    pub currency: Option<Currency>,
    pub payment_method_data: PaymentMethodData,
    pub router_return_url: Option<String>,
    pub description: Option<String>,
    pub save_card: bool,
    pub payer: PayerDetails,
}

impl PaymentsAuthorizeData {
    pub fn currency_or(&self, default_currency: Currency) -> Currency {
        self.currency.unwrap_or(default_currency)
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsCaptureData {
    pub minor_amount_to_capture: MinorUnit,
    pub currency: Currency,
    /// Authorization reference returned by the original transaction
    pub connector_transaction_id: String,
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub connector_transaction_id: String,
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub minor_refund_amount: MinorUnit,
    pub currency: Currency,
    pub connector_transaction_id: String,
}

/// Normalized result of a connector call.
///
/// A declined transaction is still a `PaymentsResponseData`, with `success`
/// unset and `error_code` filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentsResponseData {
    pub success: bool,
    pub message: String,
    /// Decoded connector body, kept for diagnostics
    pub raw_response: serde_json::Value,
    /// Reference to hand back on capture, void or refund
    pub authorization: String,
    /// Standardized AVS code, `None` when the connector code is unmapped
    pub avs_result: Option<String>,
    pub cvv_result: Option<String>,
    pub error_code: Option<StandardErrorCode>,
    pub test: bool,
}
