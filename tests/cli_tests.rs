#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Runs the `jfw-gen` binary against the fixture workspace

mod common;

use common::Workspace;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn jfw_gen(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_jfw-gen"));
    command.current_dir(dir).args(args).env_remove("RUST_LOG");
    for var in [
        "JFW_GEN_CONFIG",
        "JFW_GEN_OUTPUT_DIR",
        "JFW_GEN_FRAMEWORK_DIR",
        "JFW_GEN_TABLE_SCHEMA",
        "JFW_GEN_AUTHOR_NAME",
        "JFW_GEN_AUTHOR_CODE",
        "JFW_GEN_LOG_LEVEL",
    ] {
        command.env_remove(var);
    }
    command.output().expect("run jfw-gen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn imported() -> Workspace {
    let ws = Workspace::new();
    let output = jfw_gen(ws.path(), &["import"]);
    assert!(output.status.success(), "import failed: {output:?}");
    ws
}

#[test]
fn test_cli_init_writes_sample_config_once() {
    let dir = tempfile::TempDir::new().unwrap();

    let first = jfw_gen(dir.path(), &["init"]);
    assert!(first.status.success());
    let written = fs::read_to_string(dir.path().join("jfw-codegen.toml")).unwrap();
    assert!(written.contains("table_schema = \"JFW\""));

    fs::write(dir.path().join("jfw-codegen.toml"), "table_schema = \"X\"\n").unwrap();
    let second = jfw_gen(dir.path(), &["init"]);
    assert!(second.status.success());
    assert!(stdout(&second).contains("Skipping existing file"));
    assert_eq!(
        fs::read_to_string(dir.path().join("jfw-codegen.toml")).unwrap(),
        "table_schema = \"X\"\n"
    );
}

#[test]
fn test_cli_import_then_generate() {
    let ws = imported();
    assert!(ws.join("tables.json").is_file());

    let output = jfw_gen(ws.path(), &["generate", "--date", "2024-03-09"]);
    assert!(output.status.success(), "generate failed: {output:?}");
    assert!(ws.join("output/sp/list-stored-procedures.sql").is_file());
    assert!(ws
        .read("output/Jfw.Models/Entities/Implements/UserEntity.Generated.cs")
        .contains("- 2024-03-09: Created - dev01."));

    let again = jfw_gen(ws.path(), &["generate", "--date", "2024-03-09"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("Skipping existing file"));
}

#[test]
fn test_cli_generate_only_procedures() {
    let ws = imported();
    let output = jfw_gen(ws.path(), &["generate", "--only", "procedures", "--output", "sql-only"]);
    assert!(output.status.success());
    assert!(ws.join("sql-only/sp/insert-stored-procedures.sql").is_file());
    assert!(!ws.join("sql-only/Jfw.Models").exists());
}

#[test]
fn test_cli_generate_dry_run_writes_nothing() {
    let ws = imported();
    let output = jfw_gen(ws.path(), &["generate", "--dry-run"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Would write"));
    assert!(!ws.join("output").exists());
}

#[test]
fn test_cli_generate_without_tables_fails() {
    let ws = Workspace::new();
    let output = jfw_gen(ws.path(), &["generate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("jfw-gen import"));
}

#[test]
fn test_cli_check() {
    let ws = imported();
    let output = jfw_gen(ws.path(), &["check", "--fail-on-error"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Check Results"));
    assert!(text.contains("[parameter_count] procedure:User.Insert"));
}

#[test]
fn test_cli_check_fails_on_config_error() {
    let ws = imported();
    fs::write(
        ws.join("jfw-codegen.local.toml"),
        "view_tables = [\"User\", \"Country\"]\n",
    )
    .unwrap();

    let output = jfw_gen(ws.path(), &["check", "--fail-on-error", "--errors-only"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("[config_alias] config:procedures.Country"));
    assert!(!text.contains("parameter_count"));
}

#[test]
fn test_cli_housekeeping_tasks() {
    let ws = imported();
    assert!(jfw_gen(ws.path(), &["generate"]).status.success());

    assert!(jfw_gen(ws.path(), &["merge"]).status.success());
    let merged = ws.read("output/sp/merged-stored-procedures.sql");
    assert_eq!(merged.matches("CREATE PROCEDURE").count(), 3 * 5 + 1);

    assert!(jfw_gen(ws.path(), &["copy", "--dry-run"]).status.success());
    assert!(!ws.join("framework").exists());
    assert!(jfw_gen(ws.path(), &["copy"]).status.success());
    assert!(ws.join("framework/sp/merged-stored-procedures.sql").is_file());
    assert!(ws.join("framework/Jfw.Models/Filters/UserFilter.Generated.cs").is_file());

    fs::write(ws.join("framework/Plain.cs"), "namespace Jfw {}").unwrap();
    assert!(jfw_gen(ws.path(), &["fill-headers"]).status.success());
    let plain = ws.read("framework/Plain.cs");
    assert!(plain.starts_with("/*\n* Description: This file...\n* Author: Test Author.\n"));
    assert!(plain.ends_with("namespace Jfw {}"));

    assert!(jfw_gen(ws.path(), &["clean"]).status.success());
    assert!(ws.join("output").is_dir());
    assert_eq!(fs::read_dir(ws.join("output")).unwrap().count(), 0);
}
