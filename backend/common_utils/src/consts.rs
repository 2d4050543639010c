/// Error code used when a connector does not send one back
pub const NO_ERROR_CODE: &str = "No error code";
/// Error message used when a connector does not send one back
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Header carrying the body media type
pub const CONTENT_TYPE: &str = "Content-Type";
