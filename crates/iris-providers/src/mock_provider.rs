use async_trait::async_trait;
use iris_runtime::{AnalysisResult, BoundingBox, BridgeResult, Detection, VisionProvider};
use tracing::debug;

/// Stand-in provider with a fixed, deterministic answer.
///
/// `initialize` always reports the subsystem as available and
/// `analyze_image` never looks at the path.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockVisionProvider;

impl MockVisionProvider {
    pub fn new() -> Self {
        Self
    }

    /// The canned result returned for every image.
    pub fn fixed_result() -> AnalysisResult {
        AnalysisResult::new(
            vec![
                Detection::new("Person", 0.95, BoundingBox::new(0.1, 0.1, 0.8, 0.8)),
                Detection::new("Object", 0.87, BoundingBox::new(0.2, 0.2, 0.6, 0.6)),
            ],
            0.91,
        )
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn initialize(&self) -> BridgeResult<bool> {
        Ok(true)
    }

    async fn analyze_image(&self, image_path: &str) -> BridgeResult<AnalysisResult> {
        debug!(image_path, "Returning mock detections");
        Ok(Self::fixed_result())
    }
}
