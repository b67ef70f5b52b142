#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the schema checker

use super::*;
use crate::generator::tests::{column, sample_config, sample_schema};

fn of_kind<'a>(issues: &'a [CheckIssue], kind: &str) -> Vec<&'a CheckIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn test_audit_and_flag_columns_are_reported_as_info() {
    let issues = check_schema(&sample_schema(), &sample_config());

    let audit = of_kind(&issues, "audit_columns");
    assert_eq!(audit.len(), 3);
    assert!(audit.iter().all(|i| i.severity == CheckSeverity::Info));
    let user = audit.iter().find(|i| i.location == "table:User").unwrap();
    assert!(user
        .message
        .contains("Created_Date: [Data Type: DateTime]; [Default Value: getutcdate];"));
    assert!(user.message.contains("Modified_Date: [Data Type: DateTime]; [Default Value: none];"));

    let flags = of_kind(&issues, "flag_columns");
    let locations: Vec<&str> = flags.iter().map(|i| i.location.as_str()).collect();
    assert_eq!(locations, vec!["table:Country", "table:User"]);
    assert!(flags[0].message.starts_with("Is_Default: [Data Type: bool]"));
}

#[test]
fn test_missing_procedures() {
    let issues = check_schema(&sample_schema(), &sample_config());
    let missing = of_kind(&issues, "missing_procedures");
    assert_eq!(missing.len(), 2);
    assert_eq!(missing[0].severity, CheckSeverity::Warning);
    assert_eq!(missing[0].message, "Table Country does not have procedures");
}

#[test]
fn test_parameter_count() {
    let issues = check_schema(&sample_schema(), &sample_config());
    let counts = of_kind(&issues, "parameter_count");
    assert_eq!(counts.len(), 1, "Get has exactly one parameter");
    assert_eq!(counts[0].location, "procedure:User.Insert");
    assert_eq!(
        counts[0].message,
        "[JFW].[asp_User_Insert] should have 8 parameters - 4"
    );
}

#[test]
fn test_expected_parameter_counts() {
    let (schema, mut config) = (sample_schema(), sample_config());
    let user = schema.table("User").unwrap();

    // 12 columns, 4 read-only and not protected
    assert_eq!(expected_parameter_count(&config, "User", user, ProcedureKind::Insert), Some(8));
    // minus ID-less read-only columns (Brand_ID, Is_System, Modified_Date, Created_Date) and Created_By
    assert_eq!(expected_parameter_count(&config, "User", user, ProcedureKind::Update), Some(7));
    assert_eq!(expected_parameter_count(&config, "User", user, ProcedureKind::Get), Some(1));
    assert_eq!(expected_parameter_count(&config, "User", user, ProcedureKind::View), None);

    // 12 columns + 3 datetime ranges + 5 paging - ID
    assert_eq!(expected_parameter_count(&config, "User", user, ProcedureKind::List), Some(19));
    config.checks.list_extra_parameters.insert("User".to_string(), 2);
    assert_eq!(expected_parameter_count(&config, "User", user, ProcedureKind::List), Some(21));
}

#[test]
fn test_parameter_type_mismatch() {
    let mut schema = sample_schema();
    let table = schema.tables.get_mut("User").unwrap();
    let insert = table.procedures.get_mut("Insert").unwrap();
    insert.parameters[0].data_type_sql = "int".to_string();

    let issues = check_schema(&schema, &sample_config());
    let types = of_kind(&issues, "parameter_type");
    let brand = types
        .iter()
        .find(|i| i.message.starts_with("Parameter @Brand_ID"))
        .unwrap();
    assert_eq!(brand.message, "Parameter @Brand_ID is int but column Brand_ID is bigint");
    assert_eq!(brand.suggestion.as_deref(), Some("Declare @Brand_ID as BIGINT"));
    assert!(!types.iter().any(|i| i.message.contains("@Missing_Column")));
}

#[test]
fn test_paging_parameters_are_not_type_checked() {
    let mut schema = sample_schema();
    let table = schema.tables.get_mut("User").unwrap();
    table.columns.push(column("Limit", "bigint", "long", false));
    let mut list = table.procedures["Get"].clone();
    list.parameters[0].name = "@Limit".to_string();
    list.parameters[0].name_pascal = "Limit".to_string();
    list.parameters[0].data_type_sql = "int".to_string();
    table.procedures.insert("List".to_string(), list);

    let issues = check_schema(&schema, &sample_config());
    assert!(!of_kind(&issues, "parameter_type")
        .iter()
        .any(|i| i.message.contains("@Limit")));
}

#[test]
fn test_config_child_table_unknown() {
    let mut config = sample_config();
    config
        .procedures
        .get_mut("User")
        .unwrap()
        .child_tables
        .push("UserSetting".to_string());

    let issues = check_schema(&sample_schema(), &config);
    let children = of_kind(&issues, "config_child_table");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].severity, CheckSeverity::Error);
    assert_eq!(children[0].location, "config:child_tables.UserSetting");
    assert!(has_errors(&issues));
}

#[test]
fn test_config_alias_missing() {
    let mut config = sample_config();
    assert!(of_kind(&check_schema(&sample_schema(), &config), "config_alias").is_empty());

    config.view_tables.push("Country".to_string());
    let issues = check_schema(&sample_schema(), &config);
    let alias = of_kind(&issues, "config_alias");
    assert_eq!(alias.len(), 1);
    assert_eq!(alias[0].location, "config:procedures.Country");
}

#[test]
fn test_excluded_tables_are_not_checked() {
    let mut config = sample_config();
    config.excluded_entities.push("Country".to_string());
    let issues = check_schema(&sample_schema(), &config);
    assert!(!issues.iter().any(|i| i.location == "table:Country"));
}

#[test]
fn test_severity_display() {
    assert_eq!(CheckSeverity::Error.to_string(), "error");
    assert_eq!(CheckSeverity::Info.to_string(), "info");
}
