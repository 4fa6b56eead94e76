use serde::{Deserialize, Serialize};

use crate::model::Catalog;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// The product/environment/pathway catalog served by this process.
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for the filesystem object store.
    pub data_dir: String,
    /// Deadline in seconds applied to each object-store call.
    pub op_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            op_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "SLIPWAY_"
        config = config.add_source(
            config::Environment::with_prefix("SLIPWAY")
                .separator("_")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server_address(), "127.0.0.1:3001");
        assert!(config.catalog.products.is_empty());
    }

    #[test]
    fn catalog_deserializes_from_config_shaped_data() {
        let raw = r#"{
            "server": {"host": "0.0.0.0", "port": 8080},
            "storage": {"data_dir": "/tmp/slipway", "op_timeout_secs": 5},
            "catalog": {
                "products": [{"id": "Site", "name": "Site", "roles": ["anonymous"]}],
                "environments": [{"id": "test", "name": "Test"}],
                "pathways": []
            }
        }"#;

        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.catalog.products[0].id, "site");
        assert_eq!(config.server.port, 8080);
    }
}
