use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn bin() -> String {
    // Cargo sets this for bin targets in integration tests
    env!("CARGO_BIN_EXE_cplane").to_string()
}

fn empty_config(dir: &Path) -> PathBuf {
    let cfg = dir.join("cplane.toml");
    fs::write(&cfg, "").unwrap();
    cfg
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .arg("--config")
        .arg(empty_config(dir))
        .args(args)
        .output()
        .expect("run")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

#[test]
fn cli_adds_two_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["add", "1,1", "1,1"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "(2.000, 2.000 * i)");
}

#[test]
fn cli_accepts_negative_and_display_literals() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["mul", "-1,0", "(0.000, 1.000 * i)"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "(0.000, -1.000 * i)");

    let out = run(dir.path(), &["conj", "1.5,-2.25"]);
    assert_eq!(stdout(&out).trim(), "(1.500, 2.250 * i)");
}

#[test]
fn cli_division_modes() {
    let dir = tempfile::tempdir().unwrap();
    let exact = run(dir.path(), &["--division", "exact", "div", "3,4", "1,2"]);
    assert!(exact.status.success(), "stderr:\n{}", stderr(&exact));
    assert_eq!(stdout(&exact).trim(), "(2.200, -0.400 * i)");

    let reference = run(dir.path(), &["div", "3,4", "1,2"]);
    assert!(reference.status.success());
    assert_ne!(stdout(&reference).trim(), "(2.200, -0.400 * i)");
}

#[test]
fn cli_division_mode_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("exact.toml");
    fs::write(&cfg, "division = \"exact\"\n").unwrap();
    let out = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["div", "2,0", "0,1"])
        .output()
        .expect("run");
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "(0.000, -2.000 * i)");
}

#[test]
fn cli_reports_division_by_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["div", "1,1", "0,0"]);
    assert!(!out.status.success(), "unexpected success");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error:"));
    assert!(err.contains("Division by zero"));
}

#[test]
fn cli_rejects_malformed_number() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["show", "3;4"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("cannot parse"));
}

#[test]
fn cli_show_prints_magnitude_and_phase() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["show", "3,4"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("5.000"));
    assert!(text.contains("53.130 deg"));
}

#[test]
fn cli_plot_exports_svg() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("figs").join("z.svg");
    let out = run(
        dir.path(),
        &["plot", "4,-3", "--svg", svg.to_str().unwrap(), "--limit", "5"],
    );
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let body = fs::read_to_string(&svg).expect("svg exists");
    assert!(body.contains("z=4.0x+-3.0*i"));
    assert!(body.contains("r=5.0"));
}

#[test]
fn cli_plot_rejects_non_positive_limit() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("z.svg");
    let out = run(
        dir.path(),
        &["plot", "1,1", "--svg", svg.to_str().unwrap(), "--limit", "NaN"],
    );
    assert_eq!(out.status.code(), Some(2), "stderr:\n{}", stderr(&out));
    assert!(stderr(&out).contains("positive"));
    assert!(!svg.exists());
}

#[test]
fn cli_debug_flag_logs_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["--debug", "sub", "1,1", "1,1"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("[debug]"));
    assert_eq!(stdout(&out).trim(), "(0.000, 0.000 * i)");
}

#[test]
fn shell_reads_commands_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(bin())
        .arg("--config")
        .arg(empty_config(dir.path()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"add 1,1 1,1\ndiv 1,1 0,0\nans * 0,1\nexit\n")
        .unwrap();
    let out = child.wait_with_output().expect("wait");
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("(2.000, 2.000 * i)"));
    assert!(text.contains("(-2.000, 2.000 * i)"));
    assert!(stderr(&out).contains("Division by zero"));
}
