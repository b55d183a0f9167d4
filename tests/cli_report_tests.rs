//! End-to-end report tests driving the binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn complete(addr: &str, provider: &str, rtype: &str, elapsed: u64) -> String {
    format!(
        r#"{{"type":"apply_complete","hook":{{"action":"create","resource":{{"addr":"{}","implied_provider":"{}","resource_type":"{}","resource_name":"r"}},"elapsed_seconds":{}}}}}"#,
        addr, provider, rtype, elapsed
    )
}

#[test]
fn test_single_event_from_stdin() {
    let input = r#"{"type":"apply_complete","hook":{"resource":{"addr":"a.b","implied_provider":"aws","resource_type":"aws_instance"},"elapsed_seconds":5}}"#;
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Top 1 by address (total: 5 sec):\n  a.b: 5 sec (100.00%)\n",
        ))
        .stdout(predicate::str::contains("Top 1 by provider (avg) (total: 5 sec):"))
        .stdout(predicate::str::contains("Top 1 by resource (avg) (total: 5 sec):"));
}

#[test]
fn test_repeated_address_shows_range() {
    let input = format!(
        "{}\n{}\n",
        complete("a.b", "aws", "aws_instance", 4),
        complete("a.b", "aws", "aws_instance", 6)
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.write_stdin(input).assert().success().stdout(predicate::str::contains(
        "a.b: total 10 sec (100.00%) over 2 instances, avg: 5.00 sec [4, 6]",
    ));
}

#[test]
fn test_malformed_record_still_reports() {
    let input = format!(
        "{}\n{}\nthis is not json\n{}\n",
        complete("first", "aws", "aws_instance", 3),
        complete("second", "aws", "aws_instance", 7),
        complete("third", "aws", "aws_instance", 100)
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 by address (total: 10 sec):"))
        .stdout(predicate::str::contains("second: 7 sec (70.00%)"))
        .stdout(predicate::str::contains("first: 3 sec (30.00%)"))
        .stdout(predicate::str::contains("third").not())
        .stderr(predicate::str::contains("stopped reading input"));
}

#[test]
fn test_rust_log_level_is_honored() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.env("RUST_LOG", "debug")
        .write_stdin(complete("a", "aws", "aws_instance", 1))
        .assert()
        .success()
        .stderr(predicate::str::contains("finished reading input"));
}

#[test]
fn test_default_log_level_hides_debug() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.env_remove("RUST_LOG")
        .write_stdin(complete("a", "aws", "aws_instance", 1))
        .assert()
        .success()
        .stderr(predicate::str::contains("finished reading input").not());
}

#[test]
fn test_null_fields_are_reported() {
    let input = format!(
        "{}\n{}\n",
        r#"{"type":"apply_complete","hook":{"action":null,"resource":{"addr":"a","implied_provider":"aws","resource_type":"aws_instance","resource_name":null},"elapsed_seconds":1}}"#,
        complete("b", "aws", "aws_instance", 3)
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 by address (total: 4 sec):"))
        .stdout(predicate::str::contains("a: 1 sec (25.00%)"))
        .stdout(predicate::str::contains("b: 3 sec (75.00%)"));
}

#[test]
fn test_top_limits_rows_but_not_total() {
    let input: String = (1..=5)
        .map(|i| complete(&format!("r{}", i), "aws", "aws_instance", i) + "\n")
        .collect();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.arg("--top")
        .arg("2")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 by address (total: 15 sec):"))
        .stdout(predicate::str::contains("r5: 5 sec (33.33%)"))
        .stdout(predicate::str::contains("r4: 4 sec (26.67%)"))
        .stdout(predicate::str::contains("r3:").not());
}

#[test]
fn test_empty_input() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.write_stdin("")
        .assert()
        .success()
        .stdout(
            "Top 0 by address (total: 0 sec):\n\
             Top 0 by provider (avg) (total: 0 sec):\n\
             Top 0 by resource (avg) (total: 0 sec):\n",
        );
}

#[test]
fn test_reads_input_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"type":"version","terraform":"1.6.0"}}"#).unwrap();
    writeln!(file, "{}", complete("module.db.aws_rds_cluster.main", "aws", "aws_rds_cluster", 600)).unwrap();
    file.flush().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "module.db.aws_rds_cluster.main: 600 sec (100.00%)",
        ));
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.arg("/nonexistent/apply.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input"));
}

#[test]
fn test_json_format() {
    let input = format!(
        "{}\n{}\n",
        complete("a", "aws", "aws_instance", 2),
        complete("b", "google", "google_dns", 8)
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    let output = cmd
        .arg("--format")
        .arg("json")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["completions"], 2);
    assert_eq!(value["summary"]["complete"], true);
    assert_eq!(value["dimensions"][0]["dimension"], "address");
    assert_eq!(value["dimensions"][0]["entries"][0]["key"], "b");
    assert_eq!(value["dimensions"][2]["dimension"], "resource_type");
}

#[test]
fn test_csv_format() {
    let input = complete("a", "aws", "aws_instance", 2);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("applyprof");
    cmd.arg("--format")
        .arg("csv")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dimension,rank,key,"))
        .stdout(predicate::str::contains("address,1,a,2,100.00,1,2.00,2,2"))
        .stdout(predicate::str::contains("provider,1,aws,2,100.00,1,2.00,2,2"));
}
