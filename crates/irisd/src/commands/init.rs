use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Iris Configuration

[bridge]
channel = "ai_service"

[provider]
# "mock" returns fixed detections; "platform" uses the host detector
kind = "mock"
max_image_size_mb = 20
# image_root = "~/Pictures"

[gateway]
host = "127.0.0.1"
port = 8080
# api_token = "change-me"   # or set IRIS_API_TOKEN
allowed_origins = []
"#;

/// Initialize a new config file
pub fn run_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config already exists at {:?}", path);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    println!("Created config at {:?}", path);
    Ok(())
}
