use crate::commands::build_endpoint;
use crate::config::Config;
use anyhow::Result;
use iris_gateway::{start_server, AppState, AuthConfig};
use std::sync::Arc;
use tracing::info;

pub async fn execute(host: Option<String>, port: Option<u16>, config: &Config) -> Result<()> {
    let host = host.unwrap_or_else(|| config.gateway.host.clone());
    let port = port.unwrap_or(config.gateway.port);

    info!(host = %host, port, "Starting gateway server");

    let endpoint = build_endpoint(config)?;

    let state = AppState {
        endpoint,
        auth_config: Arc::new(AuthConfig::new(config.gateway.api_token.clone())),
        allowed_origins: config.gateway.allowed_origins.clone(),
    };

    start_server(state, &host, port).await?;

    Ok(())
}
