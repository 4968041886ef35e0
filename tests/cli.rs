use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::tempdir;

fn regcheck() -> Command {
    let mut cmd = Command::cargo_bin("regcheck").unwrap();
    cmd.env_remove("REGCHECK_STRICT").env_remove("REGCHECK_EXTRA");
    cmd
}

fn stdout_json(cmd: &mut Command, code: i32) -> Value {
    let output = cmd.assert().code(code).get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn validate_accepts_valid_record() {
    let mut cmd = regcheck();
    cmd.args(["validate", "tests/fixtures/alice.json"]);

    let value = stdout_json(&mut cmd, 0);
    assert_eq!(
        value,
        json!({
            "name": "Alice",
            "age": 30,
            "email": "alice@example.com",
            "is_employed": true,
            "address": {"city": "Moscow", "street": "Tverskaya", "house_number": 10}
        })
    );
}

#[test]
fn validate_reports_violations_with_exit_code_one() {
    let mut cmd = regcheck();
    cmd.args(["validate", "tests/fixtures/john_doe.json"]);

    let value = stdout_json(&mut cmd, 1);
    let errors = value["error"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["loc"], json!(["name"]));
    assert_eq!(errors[0]["type"], "string_pattern_mismatch");
    assert_eq!(errors[1]["loc"], json!(["age"]));
    assert_eq!(errors[1]["msg"], "if employed, age must be between 18 and 65");
}

#[test]
fn validate_malformed_input_exits_two() {
    let mut cmd = regcheck();
    cmd.args(["validate", "tests/fixtures/truncated.json"]);

    let assert = cmd
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));
    let value: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["error"][0]["type"], "json_invalid");
    assert_eq!(value["error"][0]["loc"], json!([]));
}

#[test]
fn validate_reads_stdin() {
    let record = fs::read_to_string("tests/fixtures/alice.json").unwrap();

    regcheck()
        .arg("validate")
        .write_stdin(record.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"email\": \"alice@example.com\""));

    regcheck()
        .args(["validate", "-"])
        .write_stdin(record)
        .assert()
        .success();
}

#[test]
fn validate_forbids_unknown_keys_by_default() {
    let mut cmd = regcheck();
    cmd.args(["validate", "tests/fixtures/coerced.json"]);

    let value = stdout_json(&mut cmd, 1);
    assert_eq!(
        value,
        json!({
            "error": [{
                "type": "extra_forbidden",
                "loc": ["referrer"],
                "msg": "Extra inputs are not permitted",
                "input": "newsletter"
            }]
        })
    );
}

#[test]
fn validate_extra_ignore_coerces_and_normalizes() {
    let mut cmd = regcheck();
    cmd.args(["validate", "--extra", "ignore", "tests/fixtures/coerced.json"]);

    let value = stdout_json(&mut cmd, 0);
    assert_eq!(
        value,
        json!({
            "name": "Bob",
            "age": 42,
            "email": "bob@example.org",
            "is_employed": true,
            "address": {"city": "Kazan", "street": "Baumana", "house_number": 7}
        })
    );
}

#[test]
fn validate_strict_from_environment() {
    let mut cmd = regcheck();
    cmd.env("REGCHECK_STRICT", "true")
        .env("REGCHECK_EXTRA", "ignore")
        .args(["validate", "tests/fixtures/coerced.json"]);

    let value = stdout_json(&mut cmd, 1);
    let kinds: Vec<&str> = value["error"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["int_type", "bool_type", "int_type"]);
}

#[test]
fn validate_compact_output() {
    let assert = regcheck()
        .args(["validate", "--indent", "0", "tests/fixtures/alice.json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    assert!(stdout.starts_with(r#"{"name":"Alice","age":30,"#));
}

#[test]
fn validate_missing_file_fails_with_context() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    regcheck()
        .arg("validate")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read registration record"));
}

#[test]
fn validate_file_in_temp_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("user.json");
    fs::write(
        &path,
        r#"{"name": "J", "age": 200, "email": "nope", "is_employed": false,
            "address": {"city": "Oslo", "street": "Karl Johans gate", "house_number": 1}}"#,
    )?;

    let mut cmd = regcheck();
    cmd.arg("validate").arg(&path);
    let value = stdout_json(&mut cmd, 1);
    let locs: Vec<&Value> = value["error"]
        .as_array()
        .ok_or("missing error list")?
        .iter()
        .map(|e| &e["loc"])
        .collect();
    assert_eq!(locs, vec![&json!(["name"]), &json!(["age"]), &json!(["email"])]);
    Ok(())
}

#[test]
fn schema_prints_json_schema() {
    let mut cmd = regcheck();
    cmd.arg("schema");

    let value = stdout_json(&mut cmd, 0);
    assert_eq!(value["title"], "User");
    assert_eq!(value["properties"]["name"]["pattern"], "^[a-zA-Z]+$");
}
