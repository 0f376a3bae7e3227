pub mod detector;
pub mod image_guard;
pub mod mock_provider;
pub mod platform_provider;

pub use detector::{Detector, ImageFrame};
pub use image_guard::ImageGuard;
pub use mock_provider::MockVisionProvider;
pub use platform_provider::PlatformVisionProvider;
