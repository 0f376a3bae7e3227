use std::process::{Command, Output};

fn irisd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_irisd"))
        .args(args)
        .env_remove("IRIS_API_TOKEN")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_irisd_version() {
    let output = irisd(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_irisd_help() {
    let output = irisd(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("call"));
}

#[test]
fn test_call_initialize_vision() {
    let output = irisd(&["call", "initializeVision"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["status"], "success");
    assert_eq!(json["result"], true);
}

#[test]
fn test_call_analyze_image() {
    let output = irisd(&["call", "analyzeImage", "--args", r#"{"imagePath":"/tmp/x.jpg"}"#]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(
        json["result"],
        serde_json::json!({
            "objects": [
                {"label": "Person", "confidence": 0.95, "boundingBox": [0.1, 0.1, 0.8, 0.8]},
                {"label": "Object", "confidence": 0.87, "boundingBox": [0.2, 0.2, 0.6, 0.6]}
            ],
            "confidence": 0.91
        })
    );
}

#[test]
fn test_call_missing_args_fails() {
    let output = irisd(&["call", "analyzeImage"]);
    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["code"], "INVALID_ARGUMENTS");
}

#[test]
fn test_call_unknown_method_fails() {
    let output = irisd(&["call", "recognizeText"]);
    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["code"], "NOT_IMPLEMENTED");
}

#[test]
fn test_call_invalid_json_args() {
    let output = irisd(&["call", "analyzeImage", "--args", "{oops"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_platform_provider_reports_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("iris.toml");
    std::fs::write(&config_path, "[provider]\nkind = \"platform\"\n").unwrap();

    let output = irisd(&[
        "--config",
        config_path.to_str().unwrap(),
        "call",
        "initializeVision",
    ]);
    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["code"], "VISION_NOT_AVAILABLE");
}

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iris.toml");

    let output = irisd(&["init", path.to_str().unwrap()]);
    assert!(output.status.success());
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("ai_service"));

    let again = irisd(&["init", path.to_str().unwrap()]);
    assert!(!again.status.success());
}
