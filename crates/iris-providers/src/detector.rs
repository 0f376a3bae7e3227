use anyhow::{Context, Result};
use iris_runtime::Detection;

/// Decoded RGBA8 image handed to a detector.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl ImageFrame {
    /// Decode any supported encoding (PNG, JPEG) into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .context("Failed to decode image")?
            .into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }
}

/// Runs inference on a decoded frame.
///
/// Called from a blocking worker thread, so implementations may do heavy
/// synchronous work. Returned values need not be normalized or sorted; the
/// platform provider clamps and orders them.
pub trait Detector: Send + Sync {
    fn name(&self) -> &str;

    fn detect(&self, frame: &ImageFrame) -> Result<Vec<Detection>>;
}
