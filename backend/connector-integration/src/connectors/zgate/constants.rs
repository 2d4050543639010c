use common_enums::StandardErrorCode;

pub const TRANSACTION_INIT_ENDPOINT: &str = "/transaction/init";
/// Action name recorded in the authorization reference of a purchase
pub const TRANSACTION_INIT_ACTION: &str = "transaction/init";

pub const CONTENT_TYPE: &str = "text/json";

pub const PROCESS_TYPE_SALE: &str = "sale";
pub const METHOD_CARD: &str = "card";
pub const DEFAULT_DESCRIPTION: &str = "Payment";

/// `responsecode` of a completed transaction
pub const RESPONSE_CODE_COMPLETED: i64 = 4;
/// `reasoncode` of an approved transaction
pub const REASON_CODE_APPROVED: i64 = 1;

pub const APPROVED_MESSAGE: &str = "Transaction approved";
pub const DECLINED_MESSAGE: &str = "Transaction declined";

pub const AUTHORIZATION_DELIMITER: char = ';';

/// Zgate `Z9` code to standardized AVS code.
pub const AVS_CODE_MAPPING: &[(&str, &str)] = &[("A", "A"), ("B", "I")];

/// Zgate error code to standardized error kind.
pub const STANDARD_ERROR_CODE_MAPPING: &[(&str, StandardErrorCode)] = &[
    ("2301", StandardErrorCode::IncorrectNumber),
    ("2302", StandardErrorCode::InvalidNumber),
    ("2303", StandardErrorCode::InvalidExpiryDate),
    ("2304", StandardErrorCode::InvalidCvc),
    ("2317", StandardErrorCode::ExpiredCard),
    ("2318", StandardErrorCode::IncorrectCvc),
    ("2320", StandardErrorCode::IncorrectZip),
    ("2321", StandardErrorCode::IncorrectAddress),
    ("2322", StandardErrorCode::IncorrectPin),
    ("2330", StandardErrorCode::CardDeclined),
    ("2331", StandardErrorCode::CallIssuer),
    ("2332", StandardErrorCode::PickupCard),
    ("2340", StandardErrorCode::InvalidAmount),
    ("2350", StandardErrorCode::TestModeLiveCard),
];

/// Standardized AVS code for a Zgate `Z9` code, `None` when unmapped.
pub fn avs_result(code: &str) -> Option<&'static str> {
    AVS_CODE_MAPPING
        .iter()
        .find(|(zgate_code, _)| *zgate_code == code)
        .map(|(_, standard_code)| *standard_code)
}

/// Standardized error kind for a Zgate error code. Unknown codes degrade to
/// [`StandardErrorCode::ProcessingError`].
pub fn standard_error_code(code: &str) -> StandardErrorCode {
    STANDARD_ERROR_CODE_MAPPING
        .iter()
        .find(|(zgate_code, _)| *zgate_code == code)
        .map(|(_, error_code)| *error_code)
        .unwrap_or_default()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MarketType {
    Moto,
    Retail,
}

impl MarketType {
    pub fn code(self) -> u8 {
        match self {
            Self::Moto => 1,
            Self::Retail => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum DeviceType {
    Unknown,
    UnattendedTerminal,
    SelfServiceTerminal,
    ElectronicCashRegister,
    PersonalComputerTerminal,
    Airpay,
    WirelessPos,
    Website,
    DialTerminal,
    VirtualTerminal,
}

impl DeviceType {
    pub fn code(self) -> u8 {
        match self {
            Self::Unknown => 1,
            Self::UnattendedTerminal => 2,
            Self::SelfServiceTerminal => 3,
            Self::ElectronicCashRegister => 4,
            Self::PersonalComputerTerminal => 5,
            Self::Airpay => 6,
            Self::WirelessPos => 7,
            Self::Website => 8,
            Self::DialTerminal => 9,
            Self::VirtualTerminal => 10,
        }
    }
}

// Magnetic stripe layouts. Nothing in the purchase path reads card tracks.
pub const TRACK1_PATTERN: &str = r"^%(?P<format_code>.)(?P<pan>\d{1,19})\^(?P<name>.{2,26})\^(?P<expiration>\d{0,4}|\^)(?P<service_code>\d{0,3}|\^)(?P<discretionary_data>.*)\?$";
pub const TRACK2_PATTERN: &str = r"^;(?P<pan>\d{1,19})=(?P<expiration>\d{0,4}|=)(?P<service_code>\d{0,3}|=)(?P<discretionary_data>.*)\?$";
