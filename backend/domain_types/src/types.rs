use common_enums::Currency;
use hyperswitch_masking::Secret;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub zgate: ConnectorParams,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    /// base url
    #[serde(default)]
    pub base_url: String,
    /// base url used while the merchant runs in test mode
    #[serde(default)]
    pub test_base_url: Option<String>,
}

impl ConnectorParams {
    pub fn new(base_url: String, test_base_url: Option<String>) -> Self {
        Self {
            base_url,
            test_base_url,
        }
    }

    /// Endpoint matching the environment. `None` in test mode without a
    /// configured test endpoint; the live endpoint is never a substitute.
    pub fn base_url_for(&self, test_mode: bool) -> Option<&str> {
        if test_mode {
            self.test_base_url.as_deref()
        } else {
            Some(&self.base_url)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(deserialize_with = "deserialize_url_list")]
    pub bypass_proxy_urls: Vec<String>,
}

/// Accepts a list or a single comma separated string, the form an
/// environment variable takes.
fn deserialize_url_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum UrlList {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match UrlList::deserialize(deserializer)? {
        UrlList::List(urls) => urls,
        UrlList::Joined(urls) => urls
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(ToString::to_string)
            .collect(),
    })
}

/// Merchant account the gateway operates on behalf of.
///
/// Credentials stay optional here so that a missing value is reported when
/// the gateway is constructed instead of while the file is parsed.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MerchantSettings {
    pub merchant_id: Option<String>,
    pub merchant_key: Option<Secret<String>>,
    pub default_currency: Currency,
    pub test_mode: bool,
}
