use assert_cmd::Command;
use tempfile::TempDir;

fn propsig(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("propsig").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_layout_json() {
    let dir = TempDir::new().unwrap();
    let output = propsig(&dir).args(["layout", "--json"]).output().unwrap();
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(layout["max_inputs"], 3);
    assert_eq!(layout["io_examples_signature_length"], 769);
    assert_eq!(layout["value_signature_length"], 1114);
}

#[test]
fn test_io_flat_output() {
    let dir = TempDir::new().unwrap();
    let output = propsig(&dir)
        .args([
            "io",
            "--inputs",
            "[[[1, 2, 4, 7]]]",
            "--output",
            "[[4, 5, 7, 10]]",
            "--format",
            "flat",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let flat: Vec<f64> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(flat.len(), 769 * 4);
}

#[test]
fn test_config_file_changes_input_cap() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".propsig.toml"), "max_inputs = 1\n").unwrap();
    let output = propsig(&dir).args(["layout", "--json"]).output().unwrap();
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(layout["io_examples_signature_length"], 103 + 222);
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    propsig(&dir).arg("init").assert().success();
    assert!(dir.path().join(".propsig.toml").exists());
    propsig(&dir).arg("init").assert().failure();
    propsig(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn test_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    propsig(&dir)
        .args(["value", "--value", "[1,", "--output", "[1]"])
        .assert()
        .failure();
}
