use common_enums::Currency;
use common_utils::types::{AmountConvertor, MinorUnit};
use domain_types::errors::ConnectorError;
use error_stack::ResultExt;

pub(crate) fn convert_amount<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: MinorUnit,
    currency: Currency,
) -> Result<T, error_stack::Report<ConnectorError>> {
    amount_convertor
        .convert(amount, currency)
        .change_context(ConnectorError::AmountConversionFailed)
}

/// Presence check for caller supplied fields.
pub(crate) fn required<T>(
    value: Option<T>,
    field_name: &'static str,
) -> Result<T, error_stack::Report<ConnectorError>> {
    value.ok_or_else(|| ConnectorError::MissingRequiredField { field_name }.into())
}
