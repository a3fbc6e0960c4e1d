use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/payroll")
        .join(name)
}

fn payroll_dash() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_payroll_dash"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn success(output: &Output) -> String {
    assert!(
        output.status.success(),
        "payroll_dash failed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn export_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("payments.xlsx");

    let output = payroll_dash()
        .arg("export")
        .arg(fixture("july.csv"))
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run payroll_dash");
    let text = success(&output);
    assert!(text.contains("(3 employees)"), "{text}");

    let bytes = std::fs::read(&out).expect("read workbook");
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip package");
}

#[test]
fn export_defaults_to_dated_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let output = payroll_dash()
        .current_dir(dir.path())
        .arg("export")
        .arg(fixture("june.json"))
        .output()
        .expect("run payroll_dash");
    success(&output);

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1, "{names:?}");
    assert!(names[0].starts_with("Employee_Payments_"), "{names:?}");
    assert!(names[0].ends_with(".xlsx"), "{names:?}");
}

#[test]
fn export_of_empty_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    std::fs::write(&input, "[]").unwrap();

    let output = payroll_dash()
        .arg("export")
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("x.xlsx"))
        .output()
        .expect("run payroll_dash");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no employees"));
}

#[test]
fn compare_text_lists_union_of_employees() {
    let output = payroll_dash()
        .arg("compare")
        .arg(fixture("july.csv"))
        .arg(fixture("june.json"))
        .output()
        .expect("run payroll_dash");
    let text = success(&output);

    assert!(text.contains("Comparison:"), "{text}");
    assert!(text.contains("Total Sales"), "{text}");
    let aisha = text.find("\nAisha\n").expect("Aisha section");
    let dan = text.find("\nDan\n").expect("Dan section");
    assert!(aisha < dan, "{text}");
    assert!(text.contains("\nBen\n"), "{text}");
}

#[test]
fn compare_json_output() {
    let output = payroll_dash()
        .arg("compare")
        .arg(fixture("july.csv"))
        .arg(fixture("june.json"))
        .args(["--format", "json"])
        .output()
        .expect("run payroll_dash");
    let report: Value = serde_json::from_str(&success(&output)).expect("valid JSON");

    let shop = report["shop"].as_array().expect("shop metrics");
    assert_eq!(shop.len(), 3);
    assert_eq!(shop[0]["label"], "Total Sales");
    assert_eq!(shop[0]["left"].as_f64(), Some(7390.48));
    assert_eq!(shop[0]["right"].as_f64(), Some(3000.0));

    let employees = report["employees"].as_array().expect("employees");
    let names: Vec<&str> = employees.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Aisha", "Ben", "Chloe", "Dan"]);
    assert!(employees[1]["metrics"][0]["right"].is_null());
}

#[test]
fn compare_refuses_same_input() {
    let output = payroll_dash()
        .arg("compare")
        .arg(fixture("july.csv"))
        .arg(fixture("july.csv"))
        .output()
        .expect("run payroll_dash");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("with itself"));
}

#[test]
fn compare_refuses_stdin_on_both_sides() {
    let output = payroll_dash()
        .args(["compare", "-", "-"])
        .stdin(Stdio::null())
        .output()
        .expect("run payroll_dash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("only one side of a comparison can be read from stdin"),
        "stderr:\n{stderr}"
    );
}

#[test]
fn text_report_survives_closed_stdout() {
    let mut child = payroll_dash()
        .arg("report")
        .arg(fixture("july.csv"))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn payroll_dash");

    // Simulate `payroll_dash report ... | head` exiting early.
    drop(child.stdout.take());

    let output = child.wait_with_output().expect("wait for payroll_dash");
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
}
