use std::path::PathBuf;

use domain_types::types::{Connectors, MerchantSettings, Proxy};

use crate::logger::config::Log;

/// Prefix of the environment variables that override the config file.
pub const ENV_PREFIX: &str = "ZGATE";

const CONFIG_DIRECTORY: &str = "config";
const CONFIG_FILE_NAME: &str = "development.toml";

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub proxy: Proxy,
    pub connectors: Connectors,
    #[serde(default)]
    pub merchant: MerchantSettings,
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Builds the configuration from `explicit_config_path` (or the default
    /// location) overlaid with `ZGATE__*` environment variables.
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let config_path = Self::config_path(explicit_config_path);
        tracing::debug!(config_path = %config_path.display(), "loading configuration");

        config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            // Values stay strings: a merchant id like `0042` must reach the
            // signature unchanged. Typed fields convert on deserialization.
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Config path.
    pub fn config_path(explicit_config_path: Option<PathBuf>) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            config_path.push(workspace_path());
            config_path.push(CONFIG_DIRECTORY);
            config_path.push(CONFIG_FILE_NAME);
        }
        config_path
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_the_default_location() {
        let path = Config::config_path(Some(PathBuf::from("/etc/zgate/production.toml")));
        assert_eq!(path, PathBuf::from("/etc/zgate/production.toml"));
    }

    #[test]
    fn default_path_points_into_the_config_directory() {
        let path = Config::config_path(None);
        assert!(path.ends_with("config/development.toml"));
    }
}
