use std::path::Path;

use isoroute_core::NetworkConfig;
use serde::Deserialize;

use crate::error::CliError;

/// Contents of the `--config` TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fields of [`NetworkConfig`]; `network_path` may come from `--network`
    pub network: Option<toml::Table>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Network settings with the path taken from `network_override` when given
    pub fn network_config(&self, network_override: Option<&Path>) -> Result<NetworkConfig, CliError> {
        let mut table = self.network.clone().unwrap_or_default();

        if let Some(path) = network_override {
            table.insert(
                "network_path".to_string(),
                toml::Value::String(path.to_string_lossy().into_owned()),
            );
        }
        if !table.contains_key("network_path") {
            return Err(CliError::Config(
                "no network snapshot given, use --network or set network.network_path".to_string(),
            ));
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(e.to_string()))
    }
}
