use std::fs;
use std::process::Command;

fn scan_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_edbrowse-scan"))
}

#[test]
fn scans_file_with_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let page = dir.path().join("page.html");
    let config = dir.path().join("scan.toml");
    fs::write(&page, "<div>one<span>two</span></div>").expect("write page");
    fs::write(&config, "capture_inner_html = false\n").expect("write config");

    let output = scan_cmd()
        .arg("--events")
        .arg("--config")
        .arg(&config)
        .arg(&page)
        .output()
        .expect("run edbrowse-scan");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("open span @1"), "got: {stdout}");
    assert!(!stdout.contains("inner "), "inner html disabled, got: {stdout}");
}

#[test]
fn reports_truncation_on_stderr() {
    let output = scan_cmd()
        .args(["--html", "<p>a<!-- open"])
        .output()
        .expect("run edbrowse-scan");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unterminated comment"), "got: {stderr}");
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("scan.toml");
    fs::write(&config, "no_such_key = 1\n").expect("write config");
    let output = scan_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--html", "<p>"])
        .output()
        .expect("run edbrowse-scan");
    assert!(!output.status.success());
}
