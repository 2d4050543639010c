#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestContent},
};
use domain_types::{
    connector_flow::{FlowName, Purchase, Refund},
    errors::{ApiClientError, ConnectorError},
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::{ConnectorParams, Connectors},
};
use external_services::execute_connector_processing_step;
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2,
    transport::ConnectorTransport,
};

struct EchoConnector;

impl ConnectorCommon for EchoConnector {
    fn id(&self) -> &'static str {
        "echo"
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/plain"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.zgate.base_url.as_ref()
    }
}

impl ConnectorIntegrationV2<Purchase, (), String, String> for EchoConnector {
    fn get_url(
        &self,
        _req: &RouterDataV2<Purchase, (), String, String>,
        connectors: &Connectors,
    ) -> CustomResult<String, ConnectorError> {
        Ok(format!("{}/echo", self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Purchase, (), String, String>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        Ok(Some(RequestContent::RawBytes(
            req.request.clone().into_bytes(),
        )))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Purchase, (), String, String>,
        res: Response,
    ) -> CustomResult<RouterDataV2<Purchase, (), String, String>, ConnectorError> {
        let body = String::from_utf8_lossy(&res.response).into_owned();
        Ok(data.clone().set_response(Ok(body)))
    }
}

impl ConnectorIntegrationV2<Refund, (), String, String> for EchoConnector {
    fn build_request_v2(
        &self,
        _req: &RouterDataV2<Refund, (), String, String>,
        _connectors: &Connectors,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        Err(ConnectorError::NotImplemented("Refund".to_string()).into())
    }
}

#[derive(Debug)]
struct SentRequest {
    url: String,
    method: Method,
    content_type: Option<String>,
    body: Vec<u8>,
}

enum Reply {
    Status(u16, &'static str),
    NetworkFailure,
}

struct MockTransport {
    reply: Reply,
    sent: Mutex<Vec<SentRequest>>,
}

impl MockTransport {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for MockTransport {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let content_type = request
            .get_headers_map()
            .get("Content-Type")
            .cloned();
        self.sent.lock().unwrap().push(SentRequest {
            url: request.url.clone(),
            method: request.method,
            content_type,
            body: request
                .body
                .as_ref()
                .map(RequestContent::get_body_bytes)
                .unwrap_or_default(),
        });

        match self.reply {
            Reply::Status(status_code, body) => {
                let response = Response {
                    headers: None,
                    response: bytes::Bytes::from_static(body.as_bytes()),
                    status_code,
                };
                if (200..300).contains(&status_code) {
                    Ok(Ok(response))
                } else {
                    Ok(Err(response))
                }
            }
            Reply::NetworkFailure => Err(ApiClientError::RequestTimeoutReceived.into()),
        }
    }
}

fn connectors() -> Connectors {
    Connectors {
        zgate: ConnectorParams::new("https://echo.example".to_string(), None),
    }
}

fn router_data<F>(payload: &str) -> RouterDataV2<F, (), String, String> {
    RouterDataV2::new((), ConnectorAuthType::NoKey, payload.to_string())
}

#[tokio::test]
async fn test_successful_round_trip_reaches_the_connector() {
    let transport = MockTransport::new(Reply::Status(200, "pong"));

    let result = execute_connector_processing_step(
        &transport,
        &EchoConnector,
        router_data::<Purchase>("ping"),
        &connectors(),
        FlowName::Purchase,
    )
    .await
    .unwrap();

    assert_eq!(result.response, Ok("pong".to_string()));

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "https://echo.example/echo");
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(sent[0].body, b"ping".to_vec());
}

#[tokio::test]
async fn test_refused_flow_never_touches_the_transport() {
    let transport = MockTransport::new(Reply::Status(200, "pong"));

    let err = execute_connector_processing_step(
        &transport,
        &EchoConnector,
        router_data::<Refund>("ping"),
        &connectors(),
        FlowName::Refund,
    )
    .await
    .unwrap_err();

    assert_eq!(
        *err.current_context(),
        ConnectorError::NotImplemented("Refund".to_string())
    );
    assert!(transport.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_reported_with_its_code() {
    let transport = MockTransport::new(Reply::Status(502, "bad gateway"));

    let err = execute_connector_processing_step(
        &transport,
        &EchoConnector,
        router_data::<Purchase>("ping"),
        &connectors(),
        FlowName::Purchase,
    )
    .await
    .unwrap_err();

    assert_eq!(
        *err.current_context(),
        ConnectorError::UnexpectedResponseStatus { status_code: 502 }
    );
}

#[tokio::test]
async fn test_network_failure_is_lifted_into_a_send_failure() {
    let transport = MockTransport::new(Reply::NetworkFailure);

    let err = execute_connector_processing_step(
        &transport,
        &EchoConnector,
        router_data::<Purchase>("ping"),
        &connectors(),
        FlowName::Purchase,
    )
    .await
    .unwrap_err();

    assert_eq!(*err.current_context(), ConnectorError::RequestSendFailed);
}
