use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl StorageConfig {
    pub fn certificates_file(&self) -> PathBuf {
        self.data_dir.join("certificates.json")
    }

    pub fn events_file(&self) -> PathBuf {
        self.data_dir.join("events.json")
    }

    pub fn mentors_file(&self) -> PathBuf {
        self.data_dir.join("mentors.json")
    }
}

/// Admin gating: bearer tokens resolve to issuer emails, and the email
/// must additionally be on the allow-list.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let config_str =
            fs::read_to_string(path).context(format!("Failed to read config file: {}", path))?;

        let config: AppConfig =
            toml::from_str(&config_str).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration with default path (config.toml)
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_missing_sections() {
        let config: AppConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert!(config.admin.emails.is_empty());
        assert!(config.admin.tokens.is_empty());
    }

    #[test]
    fn test_parses_full_config() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [storage]
            data_dir = "/var/lib/certify"

            [admin]
            emails = ["admin@example.com"]

            [admin.tokens]
            "secret" = "admin@example.com"
        "#;

        let config: AppConfig = toml::from_str(raw).expect("config should parse");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.storage.certificates_file(),
            PathBuf::from("/var/lib/certify/certificates.json")
        );
        assert_eq!(
            config.admin.tokens.get("secret").map(String::as_str),
            Some("admin@example.com")
        );
    }
}
