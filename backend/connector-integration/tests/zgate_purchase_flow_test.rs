#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use common_enums::{Currency, StandardErrorCode};
use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestContent},
    types::MinorUnit,
};
use connector_integration::connectors::zgate::gateway::{PurchaseOptions, ZgateGateway};
use domain_types::{
    connector_types::PayerDetails,
    errors::{ApiClientError, ConnectorError},
    payment_method_data::{Card, PaymentMethodData},
    router_response_types::Response,
    types::{ConnectorParams, Connectors, MerchantSettings},
};
use external_services::configs::Config;
use hyperswitch_masking::Secret;
use interfaces::transport::ConnectorTransport;
use serde_json::{json, Value};

const APPROVED_BODY: &str = r#"{"results":[{"responsecode":4,"reasoncode":1}],"Z1":"111","Z4":"222","A1":"333","Z9":"B","Z14":"M"}"#;
const DECLINED_BODY: &str = r#"{"results":[{"responsecode":4,"reasoncode":2,"errorcode":"2330"}],"status":"Do not honour","Z1":"112"}"#;

#[derive(Debug)]
struct SentRequest {
    url: String,
    method: Method,
    content_type: Option<String>,
    body: Value,
}

enum Reply {
    Status(u16, &'static str),
    NetworkFailure,
}

struct RecordingTransport {
    reply: Reply,
    sent: Mutex<Vec<SentRequest>>,
}

impl RecordingTransport {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for RecordingTransport {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let body = request
            .body
            .as_ref()
            .map(RequestContent::get_body_bytes)
            .unwrap_or_default();
        self.sent.lock().unwrap().push(SentRequest {
            url: request.url.clone(),
            method: request.method,
            content_type: request.get_headers_map().get("Content-Type").cloned(),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
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
            Reply::NetworkFailure => {
                Err(ApiClientError::RequestNotSent("connection reset".to_string()).into())
            }
        }
    }
}

fn merchant() -> MerchantSettings {
    MerchantSettings {
        merchant_id: Some("merchant-001".to_string()),
        merchant_key: Some(Secret::new("secret-key".to_string())),
        default_currency: Currency::USD,
        test_mode: true,
    }
}

fn connectors() -> Connectors {
    Connectors {
        zgate: ConnectorParams::new(
            "https://api.zgate.example/v1".to_string(),
            Some("https://sandbox.zgate.example/v1".to_string()),
        ),
    }
}

fn gateway(transport: Arc<RecordingTransport>) -> ZgateGateway {
    ZgateGateway::new(merchant(), connectors(), transport).unwrap()
}

fn card() -> PaymentMethodData {
    PaymentMethodData::Card(Card {
        card_number: Secret::new("4111111111111111".to_string()),
        card_exp_month: Secret::new("12".to_string()),
        card_exp_year: Secret::new("2030".to_string()),
        card_cvc: Secret::new("123".to_string()),
        card_holder_name: Some(Secret::new("Jane Doe".to_string())),
    })
}

fn options() -> PurchaseOptions {
    PurchaseOptions {
        currency: None,
        order_id: "order-42".to_string(),
        return_url: Some("https://shop.example/return".to_string()),
        description: None,
        save_card: false,
        payer: PayerDetails {
            email: Some("jane@example.com".to_string()),
            name: Some("Jane Doe".to_string()),
            phone: Some("5551234567".to_string()),
            address: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            postcode: Some("12345".to_string()),
            country: Some("US".to_string()),
        },
    }
}

#[tokio::test]
async fn test_purchase_posts_signed_transaction() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let gateway = gateway(transport.clone());

    gateway
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap();

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "https://sandbox.zgate.example/v1/transaction/init");
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].content_type.as_deref(), Some("text/json"));

    let transactions = sent[0].body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(
        transactions[0],
        json!({
            "merchantid": "merchant-001",
            "amount": "1000",
            "currency": "USD",
            "savecard": 0,
            "custom": "order-42",
            "returnurl": "https://shop.example/return",
            "description": "Payment",
            "email": "jane@example.com",
            "name": "Jane Doe",
            "phone": "5551234567",
            "address": "1 Main St",
            "city": "Springfield",
            "postcode": "12345",
            "country": "US",
            "processtype": "sale",
            "method": "card",
            "psign": "4a406bac23face783827904d9563a00cf30d32fe"
        })
    );
}

#[tokio::test]
async fn test_live_merchant_posts_to_live_endpoint() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let gateway = ZgateGateway::new(
        MerchantSettings {
            test_mode: false,
            ..merchant()
        },
        connectors(),
        transport.clone(),
    )
    .unwrap();

    let outcome = gateway
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap();

    assert!(!outcome.test);
    assert!(!gateway.test_mode());
    assert_eq!(
        transport.sent.lock().unwrap()[0].url,
        "https://api.zgate.example/v1/transaction/init"
    );
}

#[tokio::test]
async fn test_approved_purchase_outcome() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let outcome = gateway(transport)
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap();

    assert!(outcome.success);
    assert!(outcome.test);
    assert_eq!(outcome.message, "Transaction approved");
    assert_eq!(outcome.authorization, "111;222;333;transaction/init");
    assert_eq!(outcome.avs_result.as_deref(), Some("I"));
    assert_eq!(outcome.cvv_result.as_deref(), Some("M"));
    assert_eq!(outcome.error_code, None);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_gateway_is_shareable_across_threads() {
    assert_send_sync::<ZgateGateway>();
    assert_send_sync::<Arc<ZgateGateway>>();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_share_one_gateway() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let gateway = Arc::new(gateway(transport.clone()));

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let gateway = Arc::clone(&gateway);
            tokio::spawn(async move {
                let options = PurchaseOptions {
                    order_id: format!("order-{index}"),
                    ..options()
                };
                gateway
                    .purchase(MinorUnit::new(1000 + index), card(), options)
                    .await
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.success);
    }
    assert_eq!(transport.sent_count(), 8);

    let mut custom: Vec<String> = transport
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|sent| sent.body["custom"].as_str().unwrap().to_string())
        .collect();
    custom.sort();
    let mut expected: Vec<String> = (0..8).map(|index| format!("order-{index}")).collect();
    expected.sort();
    assert_eq!(custom, expected);
}

#[tokio::test]
async fn test_declined_purchase_is_an_outcome_not_an_error() {
    let transport = RecordingTransport::new(Reply::Status(200, DECLINED_BODY));
    let outcome = gateway(transport)
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Do not honour");
    assert_eq!(outcome.error_code, Some(StandardErrorCode::CardDeclined));
    assert_eq!(outcome.authorization, "112;;;transaction/init");
}

#[tokio::test]
async fn test_non_success_status_fails_the_call() {
    let transport = RecordingTransport::new(Reply::Status(500, "internal error"));
    let err = gateway(transport)
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap_err();

    assert_eq!(
        *err.current_context(),
        ConnectorError::UnexpectedResponseStatus { status_code: 500 }
    );
}

#[tokio::test]
async fn test_unreadable_body_fails_the_call() {
    let transport = RecordingTransport::new(Reply::Status(200, "<html>maintenance</html>"));
    let err = gateway(transport)
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap_err();

    assert_eq!(
        *err.current_context(),
        ConnectorError::ResponseDeserializationFailed
    );
}

#[tokio::test]
async fn test_network_failure_fails_the_call() {
    let transport = RecordingTransport::new(Reply::NetworkFailure);
    let err = gateway(transport)
        .purchase(MinorUnit::new(1000), card(), options())
        .await
        .unwrap_err();

    assert_eq!(*err.current_context(), ConnectorError::RequestSendFailed);
}

#[tokio::test]
async fn test_missing_payer_field_is_caught_before_sending() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let mut options = options();
    options.payer.phone = None;

    let err = gateway(transport.clone())
        .purchase(MinorUnit::new(1000), card(), options)
        .await
        .unwrap_err();

    assert_eq!(
        *err.current_context(),
        ConnectorError::MissingRequiredField { field_name: "phone" }
    );
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn test_unimplemented_flows_never_reach_the_network() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let gateway = gateway(transport.clone());
    let authorization = "111;222;333;transaction/init";

    let err = gateway
        .authorize(MinorUnit::new(1000), card(), options())
        .await
        .unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::NotImplemented("authorize for zgate".to_string())
    );

    let err = gateway
        .capture(MinorUnit::new(1000), authorization, None)
        .await
        .unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::NotImplemented("capture for zgate".to_string())
    );

    let err = gateway
        .refund(MinorUnit::new(500), authorization, Some(Currency::EUR))
        .await
        .unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::NotImplemented("refund for zgate".to_string())
    );

    let err = gateway.void(authorization).await.unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::NotImplemented("void for zgate".to_string())
    );

    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn test_malformed_authorization_is_rejected() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let err = gateway(transport.clone())
        .capture(MinorUnit::new(1000), "111;222", None)
        .await
        .unwrap_err();

    assert_eq!(
        *err.current_context(),
        ConnectorError::InvalidConnectorReference("111;222".to_string())
    );
    assert_eq!(transport.sent_count(), 0);
}

#[test]
fn test_credit_and_scrubbing_are_unsupported() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let gateway = gateway(transport.clone());

    let err = gateway
        .credit(MinorUnit::new(1000), &card(), &options())
        .unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::NotSupported {
            message: "credit".to_string(),
            connector: "zgate",
        }
    );

    assert!(!gateway.supports_scrubbing());
    assert!(gateway.scrub("card=4111111111111111").is_err());
    assert_eq!(transport.sent_count(), 0);
}

#[test]
fn test_construction_requires_credentials() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));

    let err = ZgateGateway::new(
        MerchantSettings {
            merchant_id: None,
            ..merchant()
        },
        connectors(),
        transport.clone(),
    )
    .unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::MissingRequiredField {
            field_name: "merchant_id"
        }
    );

    let err = ZgateGateway::new(
        MerchantSettings {
            merchant_key: Some(Secret::new(String::new())),
            ..merchant()
        },
        connectors(),
        transport,
    )
    .unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::MissingRequiredField {
            field_name: "merchant_key"
        }
    );
}

#[test]
fn test_test_mode_requires_a_test_endpoint() {
    let transport = RecordingTransport::new(Reply::Status(200, APPROVED_BODY));
    let live_only = Connectors {
        zgate: ConnectorParams::new("https://api.zgate.example/v1".to_string(), None),
    };

    let err = ZgateGateway::new(merchant(), live_only.clone(), transport.clone()).unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::InvalidConnectorConfig {
            config: "connectors.zgate.test_base_url"
        }
    );

    let live = MerchantSettings {
        test_mode: false,
        ..merchant()
    };
    assert!(ZgateGateway::new(live, live_only, transport).is_ok());
}

#[test]
fn test_gateway_from_development_config() {
    let config_path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/development.toml");
    let mut config = Config::new_with_config_path(Some(config_path)).unwrap();
    let gateway = ZgateGateway::from_config(&config).unwrap();
    assert!(gateway.test_mode());

    config.proxy.https_url = Some("::not a proxy::".to_string());
    let err = ZgateGateway::from_config(&config).unwrap_err();
    assert_eq!(
        *err.current_context(),
        ConnectorError::InvalidConnectorConfig { config: "proxy" }
    );
}

#[test]
fn test_debug_output_masks_credentials() {
    let gateway = gateway(RecordingTransport::new(Reply::Status(200, APPROVED_BODY)));
    let rendered = format!("{gateway:?}");
    assert!(!rendered.contains("secret-key"));
    assert!(!rendered.contains("merchant-001"));
}
