//! Integration tests for the convert and data-only commands.

use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::TempDir;

fn sqlite2pg() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sqlite2pg"))
}

const SQLITE_DUMP: &str = r#"PRAGMA foreign_keys=OFF;
BEGIN TRANSACTION;
CREATE TABLE `users` (
  id integer PRIMARY KEY AUTOINCREMENT,
  name text NOT NULL,
  created_at DATETIME DEFAULT (CURRENT_TIMESTAMP)
);
CREATE TABLE posts (
  id integer PRIMARY KEY AUTOINCREMENT,
  user_id integer REFERENCES users(id),
  published integer,
  published_at integer
);
INSERT INTO users VALUES(NULL,'alice','2024-01-01 00:00:00');
INSERT INTO posts VALUES(1,1,1,1609459200);
INSERT INTO posts VALUES(2,1,0,1609459200000);
COMMIT;
"#;

#[test]
fn test_convert_sqlite_to_postgres() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql");
    let output_file = temp_dir.path().join("output.sql");
    fs::write(&input_file, SQLITE_DUMP).unwrap();

    let output = sqlite2pg()
        .args([
            "convert",
            input_file.to_str().unwrap(),
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Conversion completed successfully!"));

    let result = fs::read_to_string(&output_file).unwrap();
    assert!(result.starts_with("-- Converted from SQLite to PostgreSQL\n"));
    assert!(result.contains("CREATE TABLE \"users\""));
    assert!(!result.contains('`'), "Should not have backticks");
    assert!(result.contains("id SERIAL PRIMARY KEY,"));
    assert!(result.contains("REFERENCES \"users\"(\"id\")"));
    assert!(result.contains("DEFAULT CURRENT_TIMESTAMP\n"));
    assert!(result.contains("INSERT INTO \"users\" VALUES(DEFAULT,'alice'"));
    assert!(!result.contains("PRAGMA"));
}

#[test]
fn test_data_only_sqlite_to_postgres() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql");
    let output_file = temp_dir.path().join("output.sql");
    fs::write(&input_file, SQLITE_DUMP).unwrap();

    let output = sqlite2pg()
        .args([
            "data-only",
            "--utc",
            input_file.to_str().unwrap(),
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Converted 3 INSERT statements"));
    assert!(stdout.contains("Data conversion completed successfully!"));

    let result = fs::read_to_string(&output_file).unwrap();
    assert!(!result.contains("CREATE TABLE"));
    assert!(result.contains("SET session_replication_role = replica;"));
    assert!(result.ends_with("SET session_replication_role = DEFAULT;\n"));

    let inserts: Vec<&str> = result
        .lines()
        .filter(|l| l.starts_with("INSERT INTO"))
        .collect();
    assert_eq!(
        inserts,
        vec![
            "INSERT INTO \"users\" VALUES(DEFAULT,'alice','2024-01-01 00:00:00');",
            "INSERT INTO \"posts\" VALUES(TRUE,TRUE,1,'2021-01-01 00:00:00');",
            "INSERT INTO \"posts\" VALUES(2,TRUE,FALSE,'2021-01-01 00:00:00');",
        ]
    );
}

#[test]
fn test_data_only_without_inserts() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql");
    let output_file = temp_dir.path().join("output.sql");
    fs::write(&input_file, "CREATE TABLE t (id integer);\n").unwrap();

    let output = sqlite2pg()
        .args([
            "data-only",
            input_file.to_str().unwrap(),
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No INSERT statements found in input file\nData conversion completed successfully!\n"));
    assert!(!output_file.exists());
}

#[test]
fn test_missing_input_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("output.sql");

    for command in ["convert", "data-only"] {
        let output = sqlite2pg()
            .args([
                command,
                temp_dir.path().join("missing.sql").to_str().unwrap(),
                output_file.to_str().unwrap(),
            ])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Error:"));
        assert!(stderr.contains("missing.sql"));
        assert!(!output_file.exists());
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql");
    let output_file = temp_dir.path().join("output.sql");
    fs::write(&input_file, SQLITE_DUMP).unwrap();

    for command in ["convert", "data-only"] {
        let output = sqlite2pg()
            .args([
                command,
                "--dry-run",
                input_file.to_str().unwrap(),
                output_file.to_str().unwrap(),
            ])
            .output()
            .unwrap();

        assert!(output.status.success(), "Command failed: {:?}", output);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Dry run"));
        assert!(!output_file.exists());
    }
}

#[test]
fn test_convert_gzip_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql.gz");
    let output_file = temp_dir.path().join("output.sql");

    let mut encoder = flate2::write::GzEncoder::new(
        fs::File::create(&input_file).unwrap(),
        flate2::Compression::default(),
    );
    encoder.write_all(SQLITE_DUMP.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let output = sqlite2pg()
        .args([
            "convert",
            input_file.to_str().unwrap(),
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let result = fs::read_to_string(&output_file).unwrap();
    assert!(result.contains("CREATE TABLE \"users\""));
}

#[test]
fn test_convert_crlf_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql");
    let output_file = temp_dir.path().join("output.sql");
    fs::write(
        &input_file,
        "CREATE TABLE a(x);\r\n\r\n\r\nINSERT INTO a VALUES(1);\r\n",
    )
    .unwrap();

    let output = sqlite2pg()
        .args([
            "convert",
            input_file.to_str().unwrap(),
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let result = fs::read_to_string(&output_file).unwrap();
    assert!(!result.contains('\r'));
    assert!(result.ends_with("CREATE TABLE a(x);\n\nINSERT INTO \"a\" VALUES(1);\n"));
}

#[test]
fn test_data_only_crlf_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("input.sql");
    let output_file = temp_dir.path().join("output.sql");
    fs::write(
        &input_file,
        "CREATE TABLE a(x, y);\r\nINSERT INTO a VALUES(5,1);\r\nINSERT INTO a VALUES(6,0);\r\n",
    )
    .unwrap();

    let output = sqlite2pg()
        .args([
            "data-only",
            input_file.to_str().unwrap(),
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let result = fs::read_to_string(&output_file).unwrap();
    assert!(!result.contains('\r'));
    assert!(result.contains(
        "INSERT INTO \"a\" VALUES(5,TRUE);\nINSERT INTO \"a\" VALUES(6,FALSE);\n\n-- Re-enable foreign key checks\n"
    ));
}

#[test]
fn test_requires_both_paths() {
    let output = sqlite2pg().args(["convert", "input.sql"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_completions() {
    let output = sqlite2pg().args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("sqlite2pg"));
}
