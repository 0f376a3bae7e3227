use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::call::{AnalyzeImageArgs, Call, Method};
use crate::error::{BridgeResult, CapabilityError};
use crate::provider::VisionProvider;

/// Channel name the front end opens by default.
pub const DEFAULT_CHANNEL: &str = "ai_service";

/// Routes channel calls to the injected vision provider.
///
/// Holds no mutable state, so concurrent `dispatch` calls never contend.
#[derive(Clone)]
pub struct BridgeEndpoint {
    channel: String,
    provider: Arc<dyn VisionProvider>,
}

impl BridgeEndpoint {
    pub fn new(channel: impl Into<String>, provider: Arc<dyn VisionProvider>) -> Self {
        Self {
            channel: channel.into(),
            provider,
        }
    }

    /// Endpoint on the default `ai_service` channel
    pub fn with_provider(provider: Arc<dyn VisionProvider>) -> Self {
        Self::new(DEFAULT_CHANNEL, provider)
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Dispatch one call and return its JSON result.
    pub async fn dispatch(&self, call: &Call) -> BridgeResult<Value> {
        let method = match call.method() {
            Ok(method) => method,
            Err(e) => {
                warn!(channel = %self.channel, method = %call.method, "Method not implemented");
                return Err(e);
            }
        };

        info!(channel = %self.channel, method = %method, "Dispatching call");

        let result = match method {
            Method::InitializeVision => self.initialize_vision().await,
            Method::AnalyzeImage => self.analyze_image(&call.arguments).await,
        };

        match &result {
            Ok(_) => info!(channel = %self.channel, method = %method, "Call completed"),
            Err(e) => warn!(
                channel = %self.channel,
                method = %method,
                code = %e.code,
                error = %e.message,
                "Call failed"
            ),
        }

        result
    }

    async fn initialize_vision(&self) -> BridgeResult<Value> {
        let available = self.provider.initialize().await?;
        Ok(Value::Bool(available))
    }

    async fn analyze_image(&self, arguments: &Value) -> BridgeResult<Value> {
        // Validation happens before the provider sees anything.
        let args = AnalyzeImageArgs::from_arguments(arguments)?;

        let analysis = self.provider.analyze_image(&args.image_path).await?;

        serde_json::to_value(&analysis)
            .map_err(|e| CapabilityError::internal(format!("Failed to encode result: {}", e)))
    }
}
