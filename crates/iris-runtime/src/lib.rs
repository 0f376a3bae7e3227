pub mod call;
pub mod detection;
pub mod endpoint;
pub mod error;
pub mod provider;

pub use call::{AnalyzeImageArgs, Call, Method};
pub use detection::{AnalysisResult, BoundingBox, Detection};
pub use endpoint::{BridgeEndpoint, DEFAULT_CHANNEL};
pub use error::{BridgeResult, CapabilityError, ErrorCode};
pub use provider::VisionProvider;

/// Initialize structured JSON logging on stderr (stdout carries call replies)
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
