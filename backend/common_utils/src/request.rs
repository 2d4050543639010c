use hyperswitch_masking::{Maskable, PeekInterface};
use serde::{Deserialize, Serialize};

pub type Headers = Vec<(String, Maskable<String>)>;

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

pub enum RequestContent {
    Json(serde_json::Value),
    RawBytes(Vec<u8>),
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
            Self::RawBytes(_) => "RawBytesRequestBody",
        })
    }
}

impl RequestContent {
    pub fn get_body_bytes(&self) -> Vec<u8> {
        match self {
            Self::Json(i) => serde_json::to_vec(i).unwrap_or_default(),
            Self::RawBytes(bytes) => bytes.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Header values with masked entries revealed, for handing to the HTTP client.
    pub fn get_headers_map(&self) -> std::collections::HashMap<String, String> {
        let mut map = std::collections::HashMap::new();
        for (k, v) in &self.headers {
            let val = match v {
                Maskable::Masked(s) => s.peek().to_string(),
                Maskable::Normal(s) => s.to_string(),
            };
            map.insert(k.clone(), val);
        }
        map
    }
}

#[derive(Debug)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn set_optional_body<T: Into<RequestContent>>(mut self, body: Option<T>) -> Self {
        body.map(|body| self.body.replace(body.into()));
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::Mask;

    use super::*;

    #[test]
    fn test_request_builder_keeps_header_order() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://example.test/transaction/init")
            .headers(vec![
                ("Content-Type".to_string(), "text/json".to_string().into()),
                ("X-Key".to_string(), "secret".to_string().into_masked()),
            ])
            .set_optional_body(Some(RequestContent::Json(serde_json::json!({"a": 1}))))
            .build();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.headers[0].0, "Content-Type");
        assert_eq!(request.headers[1].0, "X-Key");
        let headers = request.get_headers_map();
        assert_eq!(headers.get("X-Key").map(String::as_str), Some("secret"));
        assert_eq!(
            request.body.map(|body| body.get_body_bytes()),
            Some(br#"{"a":1}"#.to_vec())
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
