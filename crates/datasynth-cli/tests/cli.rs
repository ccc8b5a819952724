use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn person_schema() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../schemas/person.schema.json")
}

fn shop_schema() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../schemas/shop.schema.toml")
}

fn datasynth(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_datasynth"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run datasynth")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn generate_json_to_stdout_is_reproducible() {
    let dir = temp_out_dir("stdout");
    let schema = person_schema();
    let args = [
        "generate",
        "--schema",
        schema.to_str().expect("schema path"),
        "--count",
        "3",
        "--seed",
        "11",
        "--format",
        "json",
    ];

    let first = datasynth(&dir, &args);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    let second = datasynth(&dir, &args);
    assert_eq!(stdout(&first), stdout(&second));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&first)).expect("json output");
    let rows = parsed.as_array().expect("array");
    assert_eq!(rows.len(), 3);
    for row in rows {
        let age = row["age"].as_i64().expect("age");
        assert!((18..=80).contains(&age));
        assert_eq!(row["address"].as_object().map(|a| a.len()), Some(3));
    }
}

#[test]
fn generate_writes_file_from_toml_schema() {
    let dir = temp_out_dir("file");
    let out = dir.join("out").join("products.sql");
    let schema = shop_schema();
    let output = datasynth(
        &dir,
        &[
            "generate",
            "--schema",
            schema.to_str().expect("schema path"),
            "--count",
            "4",
            "--format",
            "sql",
            "--out",
            out.to_str().expect("out path"),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).starts_with("wrote 4 records"));

    let sql = fs::read_to_string(&out).expect("read sql");
    assert!(sql.contains("CREATE TABLE IF NOT EXISTS generated_data ("));
    assert_eq!(sql.matches("INSERT INTO generated_data").count(), 4);
}

#[test]
fn config_file_supplies_defaults() {
    let dir = temp_out_dir("config");
    fs::write(
        dir.join("datasynth.toml"),
        "[generate]\ncount = 2\nseed = 5\n\n[output]\nformat = \"csv\"\ncsv_delimiter = \";\"\nout_dir = \"data\"\n",
    )
    .expect("write config");

    let schema = person_schema();
    let output = datasynth(
        &dir,
        &["generate", "--schema", schema.to_str().expect("schema path")],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let csv = fs::read_to_string(dir.join("data").join("Person.csv")).expect("read csv");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("id;name;age;address"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn zero_count_fails() {
    let dir = temp_out_dir("zero");
    let schema = person_schema();
    let output = datasynth(
        &dir,
        &[
            "generate",
            "--schema",
            schema.to_str().expect("schema path"),
            "--count",
            "0",
        ],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn validate_reports_ok_and_errors() {
    let dir = temp_out_dir("validate");
    let schema = person_schema();
    let ok = datasynth(
        &dir,
        &["validate", "--schema", schema.to_str().expect("schema path")],
    );
    assert!(ok.status.success(), "{}", String::from_utf8_lossy(&ok.stderr));
    assert!(stdout(&ok).contains(": ok (0 warning(s))"));

    let broken = dir.join("broken.json");
    fs::write(
        &broken,
        r#"{ "entities": [ { "name": "x", "attributes": [ { "name": "y", "type": "colour" } ] } ] }"#,
    )
    .expect("write broken schema");
    let failed = datasynth(
        &dir,
        &["validate", "--schema", broken.to_str().expect("broken path")],
    );
    assert!(!failed.status.success());
    assert!(stdout(&failed).contains("error[schema_violation]"));
}

#[test]
fn validate_reports_warnings() {
    let dir = temp_out_dir("warnings");
    let schema = dir.join("warn.json");
    fs::write(
        &schema,
        r#"{ "entities": [ { "name": "x", "attributes": [
            { "name": "y", "type": "integer", "constraints": { "min": 9, "max": 1, "pattern": "[a-z]+" } },
            { "type": "string" }
        ] } ] }"#,
    )
    .expect("write schema");
    let output = datasynth(
        &dir,
        &["validate", "--schema", schema.to_str().expect("schema path")],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("warning[inconsistent_constraints] /x/y"));
    assert!(text.contains("warning[inert_constraint] /x/y"));
    assert!(text.contains("warning[unnamed_attribute] /x/attributes/1"));
}

#[test]
fn json_schema_is_printed() {
    let dir = temp_out_dir("json_schema");
    let output = datasynth(&dir, &["json-schema"]);
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json schema");
    assert_eq!(schema["title"], "SchemaDocument");
}

#[test]
fn vocabulary_prints_requested_count() {
    let dir = temp_out_dir("vocabulary");
    let output = datasynth(
        &dir,
        &["vocabulary", "--category", "emails", "--count", "7", "--seed", "3"],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|line| line.ends_with("@example.com")));

    let unknown = datasynth(&dir, &["vocabulary", "--category", "planets"]);
    assert!(!unknown.status.success());
}

#[test]
fn init_config_refuses_to_overwrite() {
    let dir = temp_out_dir("init");
    let first = datasynth(&dir, &["init-config"]);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    let written = fs::read_to_string(dir.join("datasynth.toml")).expect("read config");
    assert!(written.contains("[generate]"));
    assert!(written.contains("sql_table = \"generated_data\""));

    let second = datasynth(&dir, &["init-config"]);
    assert!(!second.status.success());

    let forced = datasynth(&dir, &["init-config", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn log_file_receives_json_lines() {
    let dir = temp_out_dir("logs");
    let log = dir.join("logs").join("datasynth.jsonl");
    let schema = person_schema();
    let output = datasynth(
        &dir,
        &[
            "--log-file",
            log.to_str().expect("log path"),
            "generate",
            "--schema",
            schema.to_str().expect("schema path"),
            "--count",
            "1",
            "--format",
            "xml",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).starts_with("<?xml"));

    let contents = fs::read_to_string(&log).expect("read log");
    let first: serde_json::Value =
        serde_json::from_str(contents.lines().next().expect("log line")).expect("json log line");
    assert!(first.get("timestamp").is_some());
    assert!(contents.contains("generation completed"));
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("datasynth_cli_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}
