use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{
    connector_flow::FlowName,
    errors::{ApiClientError, ConnectorError},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::{Connectors, Proxy},
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::Maskable;
use interfaces::{connector_integration_v2::ConnectorIntegrationV2, transport::ConnectorTransport};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{json, Value};
use tracing::field::Empty;

/// Transport backed by one pooled `reqwest` client, built up front from the
/// proxy settings.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(proxy: &Proxy) -> CustomResult<Self, ApiClientError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .pool_idle_timeout(Duration::from_secs(
                proxy.idle_pool_connection_timeout.unwrap_or_default(),
            ));

        let no_proxy = bypassed_hosts(&proxy.bypass_proxy_urls)
            .and_then(|hosts| reqwest::NoProxy::from_string(&hosts));
        if let Some(url) = proxy.https_url.as_ref() {
            let upstream = reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .attach_printable_lazy(|| format!("https proxy {url}"))?;
            builder = builder.proxy(upstream.no_proxy(no_proxy.clone()));
        }
        if let Some(url) = proxy.http_url.as_ref() {
            let upstream = reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .attach_printable_lazy(|| format!("http proxy {url}"))?;
            builder = builder.proxy(upstream.no_proxy(no_proxy));
        }

        let client = builder
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)?;
        Ok(Self { client })
    }

    /// Sends `request` and sorts the reply by status class. A 4xx or 5xx
    /// reply lands in the inner `Err`.
    pub async fn call_connector_api(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let url =
            reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        // Raw bytes keep the connector's own Content-Type intact.
        let mut outgoing = self
            .client
            .request(method, url)
            .headers(header_map(request.headers)?);
        if let Some(body) = request.body {
            outgoing = outgoing.body(body.get_body_bytes());
        }

        let reply = outgoing.send().await.map_err(|error| {
            tracing::warn!(%error, timeout = error.is_timeout(), "request to connector failed");
            if error.is_timeout() {
                report!(ApiClientError::RequestTimeoutReceived)
            } else {
                report!(ApiClientError::RequestNotSent(error.to_string()))
            }
        })?;
        into_response(reply).await
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for HttpClient {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        self.call_connector_api(request).await
    }
}

/// Comma joined hosts of the bypass list, the form `NO_PROXY` takes.
fn bypassed_hosts(urls: &[String]) -> Option<String> {
    let hosts = urls
        .iter()
        .filter_map(|url| {
            reqwest::Url::parse(url)
                .ok()
                .and_then(|url| url.host_str().map(str::to_owned))
        })
        .collect::<Vec<_>>();
    (!hosts.is_empty()).then(|| hosts.join(","))
}

/// Masked values are revealed here; this map only ever goes on the wire.
fn header_map(headers: Headers) -> CustomResult<HeaderMap, ApiClientError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_str(&name)
            .change_context(ApiClientError::HeaderMapConstructionFailed)
            .attach_printable_lazy(|| format!("header name {name:?}"))?;
        let header_value = HeaderValue::from_str(&value.into_inner())
            .change_context(ApiClientError::HeaderMapConstructionFailed)?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

async fn into_response(
    reply: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status = reply.status();
    if !(status.is_success() || status.is_client_error() || status.is_server_error()) {
        tracing::warn!(status_code = status.as_u16(), "unexpected status class from connector");
        return Err(report!(ApiClientError::UnexpectedServerResponse));
    }
    let headers = Some(reply.headers().clone());
    let body = reply
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)?;
    let response = Response {
        headers,
        response: body,
        status_code: status.as_u16(),
    };
    Ok(if status.is_success() {
        Ok(response)
    } else {
        Err(response)
    })
}

/// Runs one flow end to end: build the request, send it, hand the answer
/// back to the connector.
///
/// A connector that refuses to build a request stops the step before any
/// network traffic. A connector that builds none returns the router data
/// untouched.
#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        connector_name = connector.id(),
        flow = %flow,
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.status_code = Empty,
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<C, F, ResourceCommonData, Req, Resp>(
    transport: &dyn ConnectorTransport,
    connector: &C,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
    connectors: &Connectors,
    flow: FlowName,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
where
    C: ConnectorIntegrationV2<F, ResourceCommonData, Req, Resp> + ?Sized,
{
    let start = tokio::time::Instant::now();
    let connector_request = connector.build_request_v2(&router_data, connectors)?;

    let result = match connector_request {
        Some(request) => {
            let body_kind = match request.body.as_ref() {
                Some(RequestContent::Json(_)) => json!({ "request_type": "JSON" }),
                Some(RequestContent::RawBytes(_)) => json!({ "request_type": "RAW_BYTES" }),
                None => Value::Null,
            };
            let span = tracing::Span::current();
            span.record("request.url", tracing::field::display(&request.url));
            span.record("request.method", tracing::field::display(request.method));
            span.record(
                "request.headers",
                tracing::field::display(masked_headers(&request.headers)),
            );
            span.record("request.body", tracing::field::display(&body_kind));
            tracing::info!(url = %request.url, method = %request.method, "sending request to connector");

            match transport
                .send(request)
                .await
                .change_context(ConnectorError::RequestSendFailed)
            {
                Ok(Ok(body)) => {
                    span.record("response.status_code", body.status_code);
                    connector.handle_response_v2(&router_data, body)
                }
                Ok(Err(body)) => {
                    span.record("response.status_code", body.status_code);
                    tracing::error!(
                        status_code = body.status_code,
                        "connector answered with an error status"
                    );
                    Err(report!(ConnectorError::UnexpectedResponseStatus {
                        status_code: body.status_code,
                    })
                    .attach_printable(String::from_utf8_lossy(&body.response).into_owned()))
                }
                Err(err) => {
                    tracing::error!(error = ?err, "no response from connector");
                    Err(err)
                }
            }
        }
        None => Ok(router_data),
    };

    let elapsed = start.elapsed().as_millis();
    tracing::Span::current().record("latency", elapsed);
    tracing::info!(log_type = "api", "connector call completed");
    result
}

fn masked_headers(headers: &Headers) -> Value {
    Value::Object(
        headers
            .iter()
            .map(|(name, value)| {
                let shown = match value {
                    Maskable::Masked(_) => "*** masked ***".to_string(),
                    Maskable::Normal(plain) => plain.clone(),
                };
                (name.clone(), Value::String(shown))
            })
            .collect(),
    )
}
