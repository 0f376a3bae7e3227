use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `gateway.api_token`
pub const API_TOKEN_ENV: &str = "IRIS_API_TOKEN";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BridgeConfig {
    #[serde(default = "default_channel")]
    pub channel: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Platform,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    #[serde(default = "default_max_image_size_mb")]
    pub max_image_size_mb: u64,

    /// Confine image paths to this directory (`~` is expanded)
    #[serde(default)]
    pub image_root: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_channel() -> String {
    iris_runtime::DEFAULT_CHANNEL.to_string()
}

fn default_max_image_size_mb() -> u64 {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            max_image_size_mb: default_max_image_size_mb(),
            image_root: None,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_token: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// A non-empty token from the environment replaces the configured one
    pub fn with_env_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.gateway.api_token = Some(token);
        }
        self
    }
}

impl ProviderConfig {
    pub fn image_root_path(&self) -> Option<PathBuf> {
        self.image_root
            .as_deref()
            .map(|root| PathBuf::from(shellexpand::tilde(root).into_owned()))
    }
}

/// Load config from file or use defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = path {
        let content =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content).context("Failed to parse TOML config")?
    } else {
        Config::default()
    };

    Ok(config.with_env_token(std::env::var(API_TOKEN_ENV).ok()))
}
