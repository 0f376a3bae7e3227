//! Platform-backed vision provider.
//!
//! Reads the image from disk, decodes it and runs the host's detector on a
//! blocking worker so the caller's task only suspends. Without a detector
//! the host is reported as lacking the vision subsystem.

use async_trait::async_trait;
use iris_runtime::{AnalysisResult, BridgeResult, CapabilityError, VisionProvider};
use std::sync::Arc;
use tracing::{debug, info};

use crate::detector::{Detector, ImageFrame};
use crate::image_guard::ImageGuard;

pub struct PlatformVisionProvider {
    guard: ImageGuard,
    detector: Option<Arc<dyn Detector>>,
}

impl PlatformVisionProvider {
    pub fn new(guard: ImageGuard) -> Self {
        Self {
            guard,
            detector: None,
        }
    }

    /// Attach the detector backing this host's vision subsystem.
    pub fn with_detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.detector = Some(detector);
        self
    }

    fn detector(&self) -> BridgeResult<Arc<dyn Detector>> {
        self.detector.clone().ok_or_else(|| {
            CapabilityError::unavailable("Vision subsystem is not available on this host")
        })
    }
}

#[async_trait]
impl VisionProvider for PlatformVisionProvider {
    fn name(&self) -> &str {
        "platform"
    }

    async fn initialize(&self) -> BridgeResult<bool> {
        let detector = self.detector()?;
        info!(detector = detector.name(), "Vision subsystem available");
        Ok(true)
    }

    async fn analyze_image(&self, image_path: &str) -> BridgeResult<AnalysisResult> {
        let detector = self.detector()?;

        let path = self
            .guard
            .resolve(image_path)
            .map_err(|e| CapabilityError::invalid_arguments(e.to_string()))?;

        self.guard
            .check_size(&path)
            .await
            .map_err(|e| CapabilityError::internal(format!("{:#}", e)))?;

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            CapabilityError::internal(format!("Failed to read image {:?}: {}", path, e))
        })?;

        debug!(path = ?path, bytes = bytes.len(), detector = detector.name(), "Running detector");

        let detections = tokio::task::spawn_blocking(move || {
            let frame = ImageFrame::decode(&bytes)?;
            detector.detect(&frame)
        })
        .await
        .map_err(|e| CapabilityError::internal(format!("Detector task failed: {}", e)))?
        .map_err(|e| CapabilityError::internal(format!("{:#}", e)))?;

        Ok(AnalysisResult::from_detections(detections))
    }
}
