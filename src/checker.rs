//! # Schema Checker Module
//!
//! Consistency checks run over `tables.json` and the generator configuration
//! before code is generated.
//!
//! ## Checks Performed
//!
//! 1. **Audit columns** - type and default of `Created_Date` / `Modified_Date`
//! 2. **Flag columns** - type and default of `Is_System` / `Is_Default`
//! 3. **Missing procedures** - tables without any stored procedure
//! 4. **Parameter count** - procedures whose parameter list does not match the table
//! 5. **Parameter type** - parameters whose SQL type differs from their column
//! 6. **Configuration** - unknown child tables, view tables without aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jfw_codegen::checker::{check_schema, print_check_issues};
//! use jfw_codegen::config::GeneratorConfig;
//! use jfw_codegen::schema::load_tables;
//!
//! let config = GeneratorConfig::default();
//! let schema = load_tables(&config.paths.tables)?;
//! print_check_issues(&check_schema(&schema, &config));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::GeneratorConfig;
use crate::schema::{Column, Procedure, ProcedureKind, Schema, TableMetadata};
use std::collections::BTreeSet;
use std::fmt;

#[cfg(test)]
mod tests;

/// Paging and sorting parameters every List procedure declares
pub const LIST_PAGING_PARAMETERS: [&str; 5] = [
    "@Limit",
    "@Page_Size",
    "@Page_Number",
    "@Sort_Data_Field",
    "@Sort_Order",
];

/// Severity level for check issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckSeverity {
    /// Error - generated code will be wrong or incomplete
    Error,
    /// Warning - schema and procedures disagree
    Warning,
    /// Info - reported for review
    Info,
}

impl fmt::Display for CheckSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckSeverity::Error => write!(f, "error"),
            CheckSeverity::Warning => write!(f, "warning"),
            CheckSeverity::Info => write!(f, "info"),
        }
    }
}

/// A problem found in the schema or configuration
#[derive(Debug, Clone)]
pub struct CheckIssue {
    /// Where the issue occurred (e.g., "table:User", "procedure:User.Insert")
    pub location: String,
    pub severity: CheckSeverity,
    /// Kind of issue (e.g., "parameter_count", "config_alias")
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl CheckIssue {
    pub fn new(
        location: impl Into<String>,
        severity: CheckSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CheckIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Run every check over the tables selected by the config filter
pub fn check_schema(schema: &Schema, config: &GeneratorConfig) -> Vec<CheckIssue> {
    let mut issues = Vec::new();

    for (name, table) in schema.walk(config.table_filter()) {
        check_audit_columns(&mut issues, name, table);
        check_flag_columns(&mut issues, name, table);

        if table.procedures.is_empty() {
            issues.push(
                CheckIssue::new(
                    format!("table:{name}"),
                    CheckSeverity::Warning,
                    "missing_procedures",
                    format!("Table {name} does not have procedures"),
                )
                .with_suggestion("Re-run the procedure parameter export and `jfw-gen import`"),
            );
            continue;
        }

        for (kind_key, procedure) in &table.procedures {
            let location = format!("procedure:{name}.{kind_key}");
            if let Some(kind) = ProcedureKind::from_key(kind_key) {
                check_parameter_count(&mut issues, &location, config, name, table, kind, procedure);
            }
            check_parameter_types(&mut issues, &location, table, procedure);
        }
    }

    check_config(&mut issues, schema, config);
    issues
}

fn describe(column: &Column) -> String {
    format!(
        "{}: [Data Type: {}]; [Default Value: {}];",
        column.name,
        column.data_type_dot_net,
        column.default_value.as_deref().unwrap_or("none")
    )
}

fn report_columns(
    issues: &mut Vec<CheckIssue>,
    table_name: &str,
    table: &TableMetadata,
    kind: &str,
    names: [&str; 2],
) {
    let found: Vec<String> = names
        .iter()
        .filter_map(|n| table.column(n))
        .map(describe)
        .collect();
    if !found.is_empty() {
        issues.push(CheckIssue::new(
            format!("table:{table_name}"),
            CheckSeverity::Info,
            kind,
            found.join(" "),
        ));
    }
}

fn check_audit_columns(issues: &mut Vec<CheckIssue>, table_name: &str, table: &TableMetadata) {
    report_columns(issues, table_name, table, "audit_columns", ["Modified_Date", "Created_Date"]);
}

fn check_flag_columns(issues: &mut Vec<CheckIssue>, table_name: &str, table: &TableMetadata) {
    report_columns(issues, table_name, table, "flag_columns", ["Is_System", "Is_Default"]);
}

/// Parameter count a procedure of `kind` should declare for `table`
pub fn expected_parameter_count(
    config: &GeneratorConfig,
    table_name: &str,
    table: &TableMetadata,
    kind: ProcedureKind,
) -> Option<usize> {
    let columns = &table.columns;
    match kind {
        ProcedureKind::Delete | ProcedureKind::Get => Some(1),
        ProcedureKind::Insert => Some(
            columns
                .iter()
                .filter(|c| !(c.is_read_only && !c.is_protected))
                .count(),
        ),
        ProcedureKind::Update => Some(
            columns
                .iter()
                .filter(|c| !(c.is_read_only && c.name != "ID") && c.name != "Created_By")
                .count(),
        ),
        ProcedureKind::List => {
            let ranges = columns
                .iter()
                .filter(|c| {
                    matches!(c.name.as_str(), "Created_Date" | "Modified_Date")
                        || c.data_type_sql == "datetime"
                })
                .count();
            let id = usize::from(table.column("ID").is_some());
            let extra = config
                .checks
                .list_extra_parameters
                .get(table_name)
                .copied()
                .unwrap_or(0);
            let base = (columns.len() + ranges + LIST_PAGING_PARAMETERS.len()) as i64 - id as i64;
            usize::try_from(base + extra).ok()
        }
        ProcedureKind::View => None,
    }
}

fn check_parameter_count(
    issues: &mut Vec<CheckIssue>,
    location: &str,
    config: &GeneratorConfig,
    table_name: &str,
    table: &TableMetadata,
    kind: ProcedureKind,
    procedure: &Procedure,
) {
    let Some(expected) = expected_parameter_count(config, table_name, table, kind) else {
        return;
    };
    let actual = procedure.parameters.len();
    if actual == expected {
        return;
    }
    let message = match kind {
        ProcedureKind::Delete | ProcedureKind::Get => format!(
            "{} should have only one parameter - the id, found {actual}",
            procedure.name_with_schema
        ),
        _ => format!(
            "{} should have {expected} parameters - {actual}",
            procedure.name_with_schema
        ),
    };
    let mut issue = CheckIssue::new(location, CheckSeverity::Warning, "parameter_count", message);
    if kind == ProcedureKind::List {
        issue = issue.with_suggestion(format!(
            "Set checks.list_extra_parameters.{table_name} if the procedure declares extra filters"
        ));
    }
    issues.push(issue);
}

fn check_parameter_types(
    issues: &mut Vec<CheckIssue>,
    location: &str,
    table: &TableMetadata,
    procedure: &Procedure,
) {
    for parameter in &procedure.parameters {
        if LIST_PAGING_PARAMETERS.contains(&parameter.name.as_str()) {
            continue;
        }
        let Some(column) = table.column_by_pascal(&parameter.name_pascal) else {
            continue;
        };
        if column.data_type_sql != parameter.data_type_sql {
            issues.push(
                CheckIssue::new(
                    location,
                    CheckSeverity::Warning,
                    "parameter_type",
                    format!(
                        "Parameter {} is {} but column {} is {}",
                        parameter.name, parameter.data_type_sql, column.name, column.data_type_sql
                    ),
                )
                .with_suggestion(format!(
                    "Declare {} as {}",
                    parameter.name,
                    column.data_type_sql_with_length.to_uppercase()
                )),
            );
        }
    }
}

fn check_config(issues: &mut Vec<CheckIssue>, schema: &Schema, config: &GeneratorConfig) {
    let mut children: BTreeSet<&str> = config.child_tables.keys().map(String::as_str).collect();
    for custom in config.procedures.values() {
        children.extend(custom.child_tables.iter().map(String::as_str));
    }
    for child in children {
        if schema.table(child).is_none() {
            issues.push(
                CheckIssue::new(
                    format!("config:child_tables.{child}"),
                    CheckSeverity::Error,
                    "config_child_table",
                    format!("Child table {child} is not defined in tables.json"),
                )
                .with_suggestion("Fix the table name or remove it from the configuration"),
            );
        }
    }

    for view in &config.view_tables {
        if schema.table(view).is_none() {
            continue;
        }
        let has_alias = config
            .customization(view)
            .map(|c| !c.alias.is_empty())
            .unwrap_or(false);
        if !has_alias {
            issues.push(
                CheckIssue::new(
                    format!("config:procedures.{view}"),
                    CheckSeverity::Error,
                    "config_alias",
                    format!("View table {view} has no alias map"),
                )
                .with_suggestion(format!(
                    "Add [procedures.{view}.alias] with one alias per joined table"
                )),
            );
        }
    }
}

/// Print check issues grouped by severity
pub fn print_check_issues(issues: &[CheckIssue]) {
    if issues.is_empty() {
        println!("✅ No check issues found!");
        return;
    }

    let by = |severity: CheckSeverity| -> Vec<&CheckIssue> {
        issues.iter().filter(|i| i.severity == severity).collect()
    };
    let (errors, warnings, infos) = (
        by(CheckSeverity::Error),
        by(CheckSeverity::Warning),
        by(CheckSeverity::Info),
    );

    println!("\n📋 Check Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        errors.len(),
        warnings.len(),
        infos.len()
    );

    for (title, group) in [
        ("❌ Errors (must fix):", &errors),
        ("⚠️  Warnings (should fix):", &warnings),
        ("ℹ️  Info (review):", &infos),
    ] {
        if group.is_empty() {
            continue;
        }
        println!("{title}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}

pub fn has_errors(issues: &[CheckIssue]) -> bool {
    issues.iter().any(|i| i.severity == CheckSeverity::Error)
}

/// Exit with error code if there are any error-level issues
pub fn fail_if_errors(issues: &[CheckIssue]) {
    if has_errors(issues) {
        print_check_issues(issues);
        std::process::exit(1);
    }
}
