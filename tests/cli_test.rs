//! CLI integration tests for the jsonschema-model binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonschema-model"))
}

fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod analyze_command {
    use super::*;

    #[test]
    fn basic_analyze() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "id": "foo://example.com/article/schema.json",
                "type": "object",
                "properties": {
                    "title": { "type": "string" }
                }
            }"#,
        );

        cmd()
            .args(["analyze", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name":"article""#));
    }

    #[test]
    fn analyze_with_model_name() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"id":"foo://example.com/article/schema.json","type":"object"}"#,
        );

        cmd()
            .args(["analyze", schema.to_str().unwrap(), "--name", "docs"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name":"docs""#));
    }

    #[test]
    fn analyze_with_pretty() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"id":"foo://example.com/article/schema.json","type":"object"}"#,
        );

        cmd()
            .args(["analyze", schema.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn analyze_with_output_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"id":"foo://example.com/article/schema.json","type":"object"}"#,
        );
        let output = dir.path().join("model.json");

        cmd()
            .args([
                "analyze",
                schema.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""name":"article""#));
    }

    #[test]
    fn analyze_directory() {
        let dir = TempDir::new().unwrap();
        write_temp_file(
            &dir,
            "foo.json",
            r#"{"id":"foo://example.com/Foo/schema.json","type":"object"}"#,
        );
        write_temp_file(
            &dir,
            "bar.json",
            r##"{
                "id": "foo://example.com/Bar/schema.json",
                "type": "object",
                "properties": { "foo": { "$ref": "#/definitions/Foo" } }
            }"##,
        );

        cmd()
            .args(["analyze", dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name":"Foo""#))
            .stdout(predicate::str::contains(r#""name":"Bar""#));
    }

    #[test]
    fn nonexistent_input_exits_with_io_code() {
        cmd()
            .args(["analyze", "/nonexistent/input"])
            .assert()
            .failure()
            .code(3)
            .stderr(predicate::str::contains("invalid input"));
    }

    #[test]
    fn missing_id_exits_with_schema_code() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", r#"{"type":"object"}"#);

        cmd()
            .args(["analyze", schema.to_str().unwrap()])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("id"));
    }

    #[test]
    fn invalid_json_exits_with_parse_code() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", "not valid json");

        cmd()
            .args(["analyze", schema.to_str().unwrap()])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }
}
