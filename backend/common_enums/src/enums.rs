/// The three-letter ISO 4217 currency code (e.g., "USD", "EUR") for the payment amount.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    AED,
    AUD,
    BHD,
    BRL,
    CAD,
    CHF,
    CLP,
    CZK,
    DKK,
    EUR,
    GBP,
    HKD,
    HUF,
    INR,
    JOD,
    JPY,
    KRW,
    KWD,
    MXN,
    NOK,
    NZD,
    OMR,
    PLN,
    RON,
    SEK,
    SGD,
    TND,
    TRY,
    #[default]
    USD,
    VND,
    ZAR,
}

/// Vendor-neutral classification of a failed card transaction.
///
/// Connectors map their own decline and error codes into this set so that
/// callers can react to a failure without knowing provider specific codes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StandardErrorCode {
    IncorrectNumber,
    InvalidNumber,
    InvalidExpiryDate,
    InvalidCvc,
    ExpiredCard,
    IncorrectCvc,
    IncorrectZip,
    IncorrectAddress,
    IncorrectPin,
    CardDeclined,
    #[default]
    ProcessingError,
    CallIssuer,
    PickupCard,
    TestModeLiveCard,
    InvalidAmount,
}
