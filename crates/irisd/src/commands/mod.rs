pub mod call;
pub mod init;
pub mod serve;

use crate::config::{Config, ProviderKind};
use anyhow::Result;
use iris_providers::{ImageGuard, MockVisionProvider, PlatformVisionProvider};
use iris_runtime::{BridgeEndpoint, VisionProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the configured provider and wrap it in an endpoint
pub fn build_endpoint(config: &Config) -> Result<BridgeEndpoint> {
    let provider: Arc<dyn VisionProvider> = match config.provider.kind {
        ProviderKind::Mock => Arc::new(MockVisionProvider::new()),
        ProviderKind::Platform => {
            let mut guard = ImageGuard::new(config.provider.max_image_size_mb);
            if let Some(root) = config.provider.image_root_path() {
                guard = guard.with_root(root)?;
            }
            // No detector ships with this build; the host reports the
            // subsystem as unavailable until one is attached.
            warn!("Platform provider has no detector; vision calls will report VISION_NOT_AVAILABLE");
            Arc::new(PlatformVisionProvider::new(guard))
        }
    };

    info!(
        channel = %config.bridge.channel,
        provider = provider.name(),
        "Bridge endpoint ready"
    );

    Ok(BridgeEndpoint::new(config.bridge.channel.clone(), provider))
}
