use std::{fmt, str::FromStr};

use common_utils::{
    crypto::{self, Sha1},
    errors::CustomResult,
    ext_traits::{ByteSliceExt, ValueExt},
    types::StringMinorUnit,
};
use domain_types::{
    connector_flow::Purchase,
    connector_types::{PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData},
    errors::ConnectorError,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use super::constants;
use crate::utils::required;

type Error = error_stack::Report<ConnectorError>;

pub struct ZgateRouterData<T> {
    pub amount: StringMinorUnit,
    pub router_data: T,
}

impl<T> From<(StringMinorUnit, T)> for ZgateRouterData<T> {
    fn from((amount, item): (StringMinorUnit, T)) -> Self {
        Self {
            amount,
            router_data: item,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZgateAuthType {
    pub merchant_id: Secret<String>,
    pub merchant_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for ZgateAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => {
                if api_key.peek().is_empty() {
                    return Err(ConnectorError::MissingRequiredField {
                        field_name: "merchant_id",
                    }
                    .into());
                }
                if key1.peek().is_empty() {
                    return Err(ConnectorError::MissingRequiredField {
                        field_name: "merchant_key",
                    }
                    .into());
                }
                Ok(Self {
                    merchant_id: api_key.to_owned(),
                    merchant_key: key1.to_owned(),
                })
            }
            _ => Err(ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

/// Scalar carried by a transaction field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::Integer(value) => serializer.serialize_i64(*value),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// Unsigned `transaction/init` parameters.
///
/// Field order is part of the wire contract: `psign` hashes the values in
/// exactly this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZgateTransaction {
    fields: Vec<(&'static str, ParamValue)>,
}

impl ZgateTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn fields(&self) -> &[(&'static str, ParamValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
    }

    pub fn sign(self, merchant_key: &Secret<String>) -> ZgateSignedTransaction {
        let psign = sign(merchant_key, self.fields.iter().map(|(_, value)| value));
        ZgateSignedTransaction {
            transaction: self,
            psign,
        }
    }
}

/// Transaction with its `psign` bound as the last field.
#[derive(Debug, Clone, PartialEq)]
pub struct ZgateSignedTransaction {
    transaction: ZgateTransaction,
    psign: String,
}

impl ZgateSignedTransaction {
    pub fn psign(&self) -> &str {
        &self.psign
    }

    pub fn transaction(&self) -> &ZgateTransaction {
        &self.transaction
    }
}

impl Serialize for ZgateSignedTransaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.transaction.fields();
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        for (name, value) in fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry("psign", &self.psign)?;
        map.end()
    }
}

/// Lowercase hex SHA-1 of the merchant key followed by every value, no
/// delimiters.
pub fn sign<I>(secret_key: &Secret<String>, ordered_values: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let message = ordered_values
        .into_iter()
        .fold(secret_key.peek().to_owned(), |mut message, value| {
            message.push_str(&value.to_string());
            message
        });
    crypto::hex_digest(&Sha1, message.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZgatePaymentsRequest {
    pub transactions: Vec<ZgateSignedTransaction>,
}

impl
    TryFrom<
        &ZgateRouterData<
            &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for ZgateTransaction
{
    type Error = Error;
    fn try_from(
        item: &ZgateRouterData<
            &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let auth = ZgateAuthType::try_from(&router_data.connector_auth_type)?;
        let request = &router_data.request;
        let payer = &request.payer;
        let currency = request.currency_or(router_data.resource_common_data.default_currency);

        let name = payer.name.clone().or_else(|| {
            request
                .payment_method_data
                .get_card_holder_name()
                .map(|name| name.peek().to_owned())
        });

        Ok(Self::new()
            .push("merchantid", auth.merchant_id.peek().as_str())
            .push("amount", item.amount.get_amount_as_string())
            .push("currency", currency.to_string())
            .push("savecard", request.save_card)
            .push(
                "custom",
                router_data
                    .resource_common_data
                    .connector_request_reference_id
                    .as_str(),
            )
            .push(
                "returnurl",
                required(request.router_return_url.clone(), "return_url")?,
            )
            .push(
                "description",
                request
                    .description
                    .clone()
                    .unwrap_or_else(|| constants::DEFAULT_DESCRIPTION.to_string()),
            )
            .push("email", required(payer.email.clone(), "email")?)
            .push("name", required(name, "name")?)
            .push("phone", required(payer.phone.clone(), "phone")?)
            .push("address", required(payer.address.clone(), "address")?)
            .push("city", required(payer.city.clone(), "city")?)
            .push("postcode", required(payer.postcode.clone(), "postcode")?)
            .push("country", required(payer.country.clone(), "country")?)
            .push("processtype", constants::PROCESS_TYPE_SALE)
            .push("method", constants::METHOD_CARD))
    }
}

impl
    TryFrom<
        &ZgateRouterData<
            &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for ZgatePaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: &ZgateRouterData<
            &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let auth = ZgateAuthType::try_from(&item.router_data.connector_auth_type)?;
        let transaction = ZgateTransaction::try_from(item)?.sign(&auth.merchant_key);
        Ok(Self {
            transactions: vec![transaction],
        })
    }
}

/// Zgate sends codes either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ZgateCode {
    Integer(i64),
    Text(String),
}

impl ZgateCode {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ZgateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZgateResult {
    pub responsecode: Option<ZgateCode>,
    pub reasoncode: Option<ZgateCode>,
    pub errorcode: Option<ZgateCode>,
}

impl ZgateResult {
    fn is_approved(&self) -> bool {
        self.responsecode.as_ref().and_then(ZgateCode::as_i64)
            == Some(constants::RESPONSE_CODE_COMPLETED)
            && self.reasoncode.as_ref().and_then(ZgateCode::as_i64)
                == Some(constants::REASON_CODE_APPROVED)
    }

    fn error_code(&self) -> Option<&ZgateCode> {
        self.errorcode.as_ref().or(self.reasoncode.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZgatePaymentsResponse {
    pub results: Vec<ZgateResult>,
    pub status: Option<String>,
    #[serde(rename = "Z1")]
    pub transaction_id: Option<ZgateCode>,
    #[serde(rename = "Z4")]
    pub reference: Option<ZgateCode>,
    #[serde(rename = "Z9")]
    pub avs_code: Option<ZgateCode>,
    #[serde(rename = "Z14")]
    pub cvv_code: Option<ZgateCode>,
    #[serde(rename = "A1")]
    pub approval_code: Option<ZgateCode>,
}

/// Reference handed back to the caller for follow-up operations.
///
/// Rendered as `{Z1};{Z4};{A1};{action}`. Stored references depend on this
/// layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZgateAuthorization {
    pub transaction_id: String,
    pub reference: String,
    pub approval_code: String,
    pub action: String,
}

impl fmt::Display for ZgateAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delimiter = constants::AUTHORIZATION_DELIMITER;
        write!(
            f,
            "{}{delimiter}{}{delimiter}{}{delimiter}{}",
            self.transaction_id, self.reference, self.approval_code, self.action
        )
    }
}

impl FromStr for ZgateAuthorization {
    type Err = Error;

    fn from_str(authorization: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = authorization
            .split(constants::AUTHORIZATION_DELIMITER)
            .collect();
        let [transaction_id, reference, approval_code, action] = parts.as_slice() else {
            return Err(ConnectorError::InvalidConnectorReference(authorization.to_string()).into());
        };
        Ok(Self {
            transaction_id: transaction_id.to_string(),
            reference: reference.to_string(),
            approval_code: approval_code.to_string(),
            action: action.to_string(),
        })
    }
}

/// Renders one part of the authorization reference. A part carrying the
/// delimiter could not be split back out, so it is refused.
fn reference_part(code: Option<&ZgateCode>) -> Result<String, Error> {
    let part = code.map(ToString::to_string).unwrap_or_default();
    if part.contains(constants::AUTHORIZATION_DELIMITER) {
        return Err(ConnectorError::InvalidConnectorReference(part).into());
    }
    Ok(part)
}

/// Turns a Zgate response body into the normalized outcome.
///
/// A well-formed body always yields an outcome, declined or not. A body that
/// is not JSON or lacks `results` is an error, as is a `Z1`, `Z4` or `A1`
/// value containing the reference delimiter.
pub fn interpret_response(
    body: &[u8],
    action: &str,
    test_mode: bool,
) -> CustomResult<PaymentsResponseData, ConnectorError> {
    let raw_response: serde_json::Value = body
        .parse_struct("ZgatePaymentsResponse")
        .change_context(ConnectorError::ResponseDeserializationFailed)?;
    let response: ZgatePaymentsResponse = raw_response
        .clone()
        .parse_value("ZgatePaymentsResponse")
        .change_context(ConnectorError::ResponseDeserializationFailed)?;

    let first_result = response.results.first();
    let success = first_result.is_some_and(ZgateResult::is_approved);

    let message = response.status.clone().unwrap_or_else(|| {
        if success {
            constants::APPROVED_MESSAGE
        } else {
            constants::DECLINED_MESSAGE
        }
        .to_string()
    });

    let authorization = ZgateAuthorization {
        transaction_id: reference_part(response.transaction_id.as_ref())?,
        reference: reference_part(response.reference.as_ref())?,
        approval_code: reference_part(response.approval_code.as_ref())?,
        action: action.to_string(),
    };

    let error_code = (!success).then(|| {
        first_result
            .and_then(ZgateResult::error_code)
            .map(|code| constants::standard_error_code(&code.to_string()))
            .unwrap_or_default()
    });

    Ok(PaymentsResponseData {
        success,
        message,
        raw_response,
        authorization: authorization.to_string(),
        avs_result: response
            .avs_code
            .as_ref()
            .and_then(|code| constants::avs_result(&code.to_string()))
            .map(str::to_string),
        cvv_result: response.cvv_code.as_ref().map(ToString::to_string),
        error_code,
        test: test_mode,
    })
}
