#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::collections::HashMap;
use tempfile::TempDir;

#[test]
fn test_sample_config_parses() {
    let config: GeneratorConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
    config.validate().unwrap();

    assert_eq!(config.table_schema, "JFW");
    assert_eq!(config.excluded_entities, vec!["LOG4NET".to_string()]);
    assert_eq!(config.table_path("UserProfile"), "user");
    assert_eq!(config.table_path("RolePermission"), "");
    assert_eq!(
        config.children_of("User"),
        &["UserProfile".to_string(), "UserSetting".to_string()]
    );
    assert_eq!(config.child_tables["BrandEmail"].suffix, "Email");

    let user = config.customization("User").unwrap();
    assert_eq!(user.alias["UserProfile"], "UP");
    assert_eq!(user.custom_parameters.len(), 5);
    assert_eq!(user.custom_parameters[4].property_type, "long?");
    assert!(user.custom_parameters[0]
        .filter_criteria
        .contains("[{{tableSchema}}].[fn_GetBrandID]"));
}

#[test]
fn test_sample_filter_criteria_keep_quoted_sql_literals() {
    let config: GeneratorConfig = toml::from_str(SAMPLE_CONFIG).unwrap();

    let device = config.customization("Device").unwrap();
    let brand = &device.custom_parameters[0].filter_criteria;
    assert!(brand.contains("[fn_Split](''', @Brand_ID, ''', DEFAULT)"));
    assert!(brand.trim_end().ends_with("END"));

    let issue = config.customization("Issue").unwrap();
    let user = issue
        .custom_parameters
        .iter()
        .find(|p| p.name == "User_ID")
        .unwrap();
    assert!(user
        .filter_criteria
        .contains("[fn_Split](''', @User_ID, ''', DEFAULT)"));
}

#[test]
fn test_defaults_without_file() {
    let config = GeneratorConfig::default();
    assert_eq!(config.type_mapping["uniqueidentifier"], "Guid");
    assert!(config.is_soft_delete("Payment"));
    assert!(config.has_view("Device"));
    assert!(!config.has_view("Payment"));
    assert!(config.toggles.filters);
    assert_eq!(config.author.dev_code, "dev22");
}

#[test]
fn test_table_filter() {
    let config = GeneratorConfig {
        included_entities: vec!["User".into(), "LOG4NET".into()],
        ..GeneratorConfig::default()
    };
    let filter = config.table_filter();
    assert!(filter.allows("User"));
    assert!(!filter.allows("Brand"));
    // Exclusion wins over inclusion
    assert!(!filter.allows("LOG4NET"));
}

#[test]
fn test_core_suffix_filter() {
    let config = GeneratorConfig {
        excluded_core_suffixes: vec![".Errors".into()],
        ..GeneratorConfig::default()
    };
    assert!(config.allows_core_suffix(""));
    assert!(!config.allows_core_suffix(".Errors"));

    let config = GeneratorConfig {
        included_core_suffixes: vec![".Constants".into()],
        ..GeneratorConfig::default()
    };
    assert!(config.allows_core_suffix(".Constants"));
    assert!(!config.allows_core_suffix(".Overrides"));
}

#[test]
fn test_local_override_is_merged() {
    let dir = TempDir::new().unwrap();
    let main = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &main,
        r#"
table_schema = "JFW"
excluded_entities = ["LOG4NET", "Audit"]

[toggles]
filters = true
procedures = true

[author]
full_name = "Jin Jackson"
"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(LOCAL_CONFIG_FILE_NAME),
        r#"
excluded_entities = ["Temp"]

[toggles]
procedures = false
"#,
    )
    .unwrap();

    let config = load_config_file(&main).unwrap().unwrap();
    assert_eq!(config.excluded_entities, vec!["Temp".to_string()]);
    assert!(config.toggles.filters);
    assert!(!config.toggles.procedures);
    assert_eq!(config.author.full_name, "Jin Jackson");
}

#[test]
fn test_missing_file_is_none() {
    let dir = TempDir::new().unwrap();
    let result = load_config_file(&dir.path().join("missing.toml")).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_invalid_toml_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "table_schema = [").unwrap();
    let err = load_config_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains(CONFIG_FILE_NAME));
}

#[test]
fn test_resolve_config_path() {
    let dir = TempDir::new().unwrap();
    assert!(resolve_config_path(None, dir.path()).is_none());

    let auto = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&auto, "").unwrap();
    assert_eq!(resolve_config_path(None, dir.path()), Some(auto));

    let explicit = dir.path().join("other.toml");
    assert_eq!(
        resolve_config_path(Some(&explicit), dir.path()),
        Some(explicit.clone())
    );
}

#[test]
fn test_env_overrides() {
    let vars: HashMap<&str, &str> = [
        ("JFW_GEN_OUTPUT_DIR", "/tmp/out"),
        ("JFW_GEN_TABLE_SCHEMA", "APP"),
        ("JFW_GEN_AUTHOR_CODE", "dev01"),
    ]
    .into_iter()
    .collect();
    let mut config = GeneratorConfig::default();
    config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.paths.output, PathBuf::from("/tmp/out"));
    assert_eq!(config.table_schema, "APP");
    assert_eq!(config.author.dev_code, "dev01");
    assert_eq!(config.author.full_name, "Jin Jackson");
}

#[test]
fn test_partial_type_mapping_keeps_defaults() {
    let mut config: GeneratorConfig = toml::from_str(
        r#"
[type_mapping]
money = "double"
"#,
    )
    .unwrap();
    config.fill_type_mapping();
    assert_eq!(config.type_mapping["money"], "double");
    assert_eq!(config.type_mapping["bigint"], "long");
}

#[test]
fn test_validate_errors() {
    let config = GeneratorConfig {
        table_schema: " ".into(),
        ..GeneratorConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::EmptyTableSchema));

    let config = GeneratorConfig {
        excluded_core_suffixes: vec![".Tests".into()],
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::UnknownCoreSuffix { .. })
    ));

    let mut config = GeneratorConfig::default();
    config.procedures.insert(
        "User".into(),
        ProcedureCustomization {
            child_tables: vec!["UserProfile".into()],
            ..ProcedureCustomization::default()
        },
    );
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("[child_tables.UserProfile]"));
}

#[test]
fn test_column_flags_match_table() {
    let config: GeneratorConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
    assert!(config.flags_for("User", "Username").any(|f| f.encrypted));
    assert_eq!(config.flags_for("Brand", "Username").count(), 0);
}

#[test]
fn test_write_config_if_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
    assert!(write_config_if_missing(&path).unwrap());
    assert!(!write_config_if_missing(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE_CONFIG);
}
