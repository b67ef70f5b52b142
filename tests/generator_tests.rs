#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end generation from the raw fixture exports

mod common;

use chrono::NaiveDate;
use common::Workspace;
use jfw_codegen::checker::{check_schema, has_errors};
use jfw_codegen::generator::{generate_all, write_files, GenContext, GenerationScope, WriteOptions};
use jfw_codegen::schema::{load_tables, save_tables};
use jfw_codegen::tasks::{merge_procedures, MERGED_SCRIPT_NAME};
use jfw_codegen::template::RenderContext;
use std::fs;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

#[test]
fn test_import_fixture_records() {
    let ws = Workspace::new();
    let config = ws.config();
    let schema = ws.import(&config);

    assert_eq!(schema.len(), 3, "procedures of unknown tables are skipped");
    let user = schema.table("User").unwrap();
    assert_eq!(user.columns.len(), 11);

    let username = user.column("Username").unwrap();
    assert!(username.is_encrypted);
    assert_eq!(username.data_type_sql_with_length, "nvarchar(100)");

    let brand = user.column("Brand_ID").unwrap();
    assert!(brand.is_read_only && brand.is_protected);

    let display = user.column("Display_Name").unwrap();
    assert_eq!(display.data_type_sql_with_length, "nvarchar(MAX)");
    assert_eq!(display.data_type_dot_net, "string");

    assert_eq!(user.column("Is_System").unwrap().default_value.as_deref(), Some("false"));
    assert_eq!(user.column("UID").unwrap().default_value.as_deref(), Some("newid"));
    assert_eq!(user.column("Modified_Date").unwrap().data_type_dot_net, "DateTime?");

    let insert = &user.procedures["Insert"];
    assert_eq!(insert.key, "UserInsert");
    assert_eq!(insert.name_with_schema, "[JFW].[asp_User_Insert]");
    assert!(insert.parameters[0].is_required);
    assert_eq!(insert.parameters[2].default_value, "NULL");
    assert!(!insert.parameters[2].is_required);

    save_tables(&config.paths.tables, &schema).unwrap();
    assert_eq!(load_tables(&config.paths.tables).unwrap(), schema);
}

#[test]
fn test_generate_and_write_full_tree() {
    let ws = Workspace::new();
    let config = ws.config();
    let schema = ws.import(&config);
    let ctx = RenderContext::new(&config, date());
    let files = generate_all(&GenContext::new(&schema, &config, &ctx), &GenerationScope::all()).unwrap();

    let report = write_files(&config.paths.output, &files, WriteOptions::default()).unwrap();
    assert_eq!(report.written.len(), files.len());
    assert!(report.skipped.is_empty());

    for path in [
        "output/Jfw.Models/Entities/Interfaces/IUserEntity.Generated.cs",
        "output/Jfw.Models/Entities/Implements/CountryEntity.cs",
        "output/Jfw.Core/EntityClasses/Interfaces/Models/IUserModel.Generated.cs",
        "output/Jfw.Core/EntityClasses/user/User.Properties.cs",
        "output/Jfw.Core/EntityClasses/user/User.Properties.Profile.cs",
        "output/Jfw.DataAccess/Implements/UserDao.Generated.cs",
        "output/Jfw.Repositories/Implements/UserRepository.cs",
        "output/Jfw.Models/Filters/UserFilter.Generated.cs",
        "output/Jfw.Models/StoredProcedureConstants.Generated.cs",
        "output/Jfw.Models/StoredProcedures.xml",
        "output/sp/insert-stored-procedures.sql",
        "output/sp/view-stored-procedures.sql",
    ] {
        assert!(ws.join(path).is_file(), "{path} was not written");
    }
    assert!(!ws.join("output/Jfw.Core/EntityClasses/user/UserProfile.Properties.cs").exists());

    let interface = ws.read("output/Jfw.Models/Entities/Interfaces/IUserEntity.Generated.cs");
    assert!(interface.contains("* Author: Test Author."));
    assert!(interface.contains("- 2024-03-09: Created - dev01."));

    let insert = ws.read("output/sp/insert-stored-procedures.sql");
    assert_eq!(insert.matches("CREATE PROCEDURE").count(), 3);
    assert!(insert.contains("CREATE PROCEDURE [JFW].[asp_User_Insert]"));

    let view = ws.read("output/sp/view-stored-procedures.sql");
    assert_eq!(view.matches("CREATE PROCEDURE").count(), 1);
    assert!(view.contains("LEFT JOIN [JFW].[UserProfile] AS UP ON U.[ID] = UP.[User_ID]"));

    let xml = ws.read("output/Jfw.Models/StoredProcedures.xml");
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("UserInsert"));
}

#[test]
fn test_regeneration_preserves_user_owned_files() {
    let ws = Workspace::new();
    let config = ws.config();
    let schema = ws.import(&config);
    let ctx = RenderContext::new(&config, date());
    let files = generate_all(&GenContext::new(&schema, &config, &ctx), &GenerationScope::all()).unwrap();
    write_files(&config.paths.output, &files, WriteOptions::default()).unwrap();

    let user_owned = ws.join("output/Jfw.DataAccess/Implements/UserDao.cs");
    let generated = ws.join("output/Jfw.DataAccess/Implements/UserDao.Generated.cs");
    let original_generated = fs::read_to_string(&generated).unwrap();
    fs::write(&user_owned, "// hand written").unwrap();
    fs::write(&generated, "// stale").unwrap();

    let report = write_files(&config.paths.output, &files, WriteOptions::default()).unwrap();
    assert!(report.skipped.contains(&user_owned));
    assert_eq!(fs::read_to_string(&user_owned).unwrap(), "// hand written");
    assert_eq!(fs::read_to_string(&generated).unwrap(), original_generated);

    let forced = WriteOptions {
        force: true,
        dry_run: false,
    };
    let report = write_files(&config.paths.output, &files, forced).unwrap();
    assert!(report.skipped.is_empty());
    assert_ne!(fs::read_to_string(&user_owned).unwrap(), "// hand written");
}

#[test]
fn test_merge_generated_scripts() {
    let ws = Workspace::new();
    let config = ws.config();
    let schema = ws.import(&config);
    let ctx = RenderContext::new(&config, date());
    let scope = GenerationScope {
        procedures: true,
        ..GenerationScope::none()
    };
    let files = generate_all(&GenContext::new(&schema, &config, &ctx), &scope).unwrap();
    assert_eq!(files.len(), 6);
    write_files(&config.paths.output, &files, WriteOptions::default()).unwrap();

    let merged = merge_procedures(&config.paths.output).unwrap();
    assert!(merged.ends_with(MERGED_SCRIPT_NAME));
    let text = fs::read_to_string(merged).unwrap();
    let delete = text.find("[asp_User_Delete]").unwrap();
    let insert = text.find("[asp_User_Insert]").unwrap();
    let view = text.find("[asp_User_View]").unwrap();
    assert!(delete < insert && insert < view);
}

#[test]
fn test_check_fixture_schema() {
    let ws = Workspace::new();
    let config = ws.config();
    let schema = ws.import(&config);
    let issues = check_schema(&schema, &config);

    assert!(!has_errors(&issues));
    assert!(issues
        .iter()
        .any(|i| i.kind == "missing_procedures" && i.location == "table:UserProfile"));
    assert!(issues.iter().any(|i| i.kind == "parameter_type"
        && i.message == "Parameter @Status is int but column Status is smallint"));
    assert!(issues.iter().any(|i| i.kind == "parameter_count"
        && i.message == "[JFW].[asp_User_Insert] should have 7 parameters - 4"));
}
