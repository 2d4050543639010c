#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use common_enums::Currency;
use external_services::{configs::Config, logger::config::LogFormat};
use hyperswitch_masking::PeekInterface;

fn development_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/development.toml")
}

// One test touches the process environment; splitting it would let parallel
// tests observe each other's overrides.
#[test]
fn test_development_config_and_environment_overrides() {
    let config = Config::new_with_config_path(Some(development_config_path()))
        .expect("development config should deserialize");

    assert!(config.log.console.enabled);
    assert_eq!(config.log.console.log_format, LogFormat::Default);
    assert_eq!(config.log.console.level.into_level(), tracing::Level::DEBUG);

    assert_eq!(config.connectors.zgate.base_url, "https://api.zgate.example/v1");
    assert_eq!(config.proxy.idle_pool_connection_timeout, Some(90));
    assert!(config.proxy.bypass_proxy_urls.is_empty());

    assert_eq!(config.merchant.merchant_id.as_deref(), Some("merchant-001"));
    assert_eq!(
        config.merchant.merchant_key.as_ref().map(|key| key.peek().as_str()),
        Some("development-signing-key")
    );
    assert_eq!(config.merchant.default_currency, Currency::USD);
    assert!(config.merchant.test_mode);

    let overrides = [
        ("ZGATE__CONNECTORS__ZGATE__TEST_BASE_URL", "https://override.zgate.example"),
        ("ZGATE__MERCHANT__MERCHANT_ID", "0042"),
        ("ZGATE__MERCHANT__MERCHANT_KEY", "1e5"),
        ("ZGATE__MERCHANT__TEST_MODE", "false"),
        ("ZGATE__PROXY__IDLE_POOL_CONNECTION_TIMEOUT", "30"),
        (
            "ZGATE__PROXY__BYPASS_PROXY_URLS",
            "https://a.zgate.example,https://b.zgate.example",
        ),
    ];
    for (key, value) in overrides {
        std::env::set_var(key, value);
    }
    let config = Config::new_with_config_path(Some(development_config_path()));
    for (key, _) in overrides {
        std::env::remove_var(key);
    }
    let config = config.unwrap();

    assert_eq!(
        config.connectors.zgate.base_url_for(true),
        Some("https://override.zgate.example")
    );
    assert_eq!(config.merchant.merchant_id.as_deref(), Some("0042"));
    assert_eq!(
        config.merchant.merchant_key.as_ref().map(|key| key.peek().as_str()),
        Some("1e5")
    );
    assert!(!config.merchant.test_mode);
    assert_eq!(config.proxy.idle_pool_connection_timeout, Some(30));
    assert_eq!(
        config.proxy.bypass_proxy_urls,
        vec![
            "https://a.zgate.example".to_string(),
            "https://b.zgate.example".to_string()
        ]
    );
}
