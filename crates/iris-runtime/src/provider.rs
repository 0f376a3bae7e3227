use async_trait::async_trait;

use crate::detection::AnalysisResult;
use crate::error::BridgeResult;

/// Async vision capability trait.
/// Note: Uses async_trait so the endpoint can hold providers as `Arc<dyn VisionProvider>`
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for logging and health reporting
    fn name(&self) -> &str;

    /// Bring up the vision subsystem; `Ok(true)` when it is usable.
    async fn initialize(&self) -> BridgeResult<bool>;

    /// Analyze the image at `image_path`.
    async fn analyze_image(&self, image_path: &str) -> BridgeResult<AnalysisResult>;
}
