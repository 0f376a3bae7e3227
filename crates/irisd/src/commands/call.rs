use crate::commands::build_endpoint;
use crate::config::Config;
use anyhow::{Context, Result};
use iris_gateway::MethodReply;
use iris_runtime::Call;
use serde_json::Value;

/// Dispatch one call in-process and print the reply.
/// Returns whether the call succeeded.
pub async fn execute(method: String, args: Option<String>, config: &Config) -> Result<bool> {
    let arguments = match args {
        Some(raw) => serde_json::from_str(&raw).context("--args is not valid JSON")?,
        None => Value::Null,
    };

    let endpoint = build_endpoint(config)?;
    let reply = MethodReply::from(endpoint.dispatch(&Call::new(method, arguments)).await);

    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(reply.is_success())
}
