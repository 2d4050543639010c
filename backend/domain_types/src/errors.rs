/// Errors raised while building, sending or interpreting a connector call.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Invalid connector configuration: {config}")]
    InvalidConnectorConfig { config: &'static str },
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Error while obtaining URL for the integration")]
    FailedToObtainIntegrationUrl,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to convert amount to the connector's format")]
    AmountConversionFailed,
    #[error("Failed to send request to connector")]
    RequestSendFailed,
    #[error("Connector responded with unexpected status code {status_code}")]
    UnexpectedResponseStatus { status_code: u16 },
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("Connector reference `{0}` is malformed")]
    InvalidConnectorReference(String),
    #[error("{0} is not implemented")]
    NotImplemented(String),
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
}

/// Errors raised by the HTTP client talking to a connector.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("URL encoding of request failed")]
    UrlEncodingFailed,
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Failed to send request to connector: {0}")]
    RequestNotSent(String),
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with an unexpected status")]
    UnexpectedServerResponse,
}
