//! SQL scripts under `sp/`, one file per procedure kind.
//!
//! Each script drops and recreates the procedure of every table, with the
//! per-table blocks separated by a blank line. Tables for which a kind does
//! not apply (View for tables without customisation) are left out of that
//! script.

mod delete;
mod get;
mod insert;
mod list;
mod update;
mod view;


use super::{sp_path, GenContext, GeneratedFile};
use crate::schema::{Column, ProcedureKind, TableMetadata};

/// File name of the script holding every procedure of `kind`
pub fn script_file_name(kind: ProcedureKind) -> String {
    format!("{}-stored-procedures.sql", kind.key().to_lowercase())
}

pub fn generate_procedures(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    ProcedureKind::ALL
        .iter()
        .map(|kind| {
            let scripts: Vec<String> = gen
                .tables()
                .filter_map(|(name, table)| procedure_script(gen, *kind, name, table))
                .collect();
            GeneratedFile::generated(sp_path(&script_file_name(*kind)), scripts.join("\n\n"))
        })
        .collect()
}

/// Script creating the `kind` procedure of one table
pub fn procedure_script(
    gen: &GenContext<'_>,
    kind: ProcedureKind,
    name: &str,
    table: &TableMetadata,
) -> Option<String> {
    match kind {
        ProcedureKind::Insert => Some(insert::script(gen, name, table)),
        ProcedureKind::Update => Some(update::script(gen, name, table)),
        ProcedureKind::Delete => Some(delete::script(gen, name)),
        ProcedureKind::Get => Some(get::script(gen, name)),
        ProcedureKind::List => Some(list::script(gen, name, table)),
        ProcedureKind::View => view::script(gen, name, table),
    }
}

/// Upper-cased SQL type with length, e.g. `NVARCHAR(100)`
pub(crate) fn sql_type(column: &Column) -> String {
    column.data_type_sql_with_length.to_uppercase()
}

/// SQL literal for a column default, or `None` when the default is an expression
fn sql_literal(value: &str) -> Option<String> {
    match value {
        "" => None,
        "true" => Some("1".to_string()),
        "false" => Some("0".to_string()),
        v if v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && v.chars().any(|c| c.is_ascii_alphabetic())
            && !v.eq_ignore_ascii_case("null") =>
        {
            // function call with its parentheses stripped, e.g. getutcdate
            None
        }
        v => Some(v.to_string()),
    }
}

/// ` = value` suffix of an Insert/Update parameter declaration
pub(crate) fn parameter_default(column: &Column) -> String {
    if matches!(column.name.as_str(), "Is_Default" | "Is_System") {
        return " = 0".to_string();
    }
    match column.default_value.as_deref().and_then(sql_literal) {
        Some(value) => format!(" = {value}"),
        None if column.is_nullable => " = NULL".to_string(),
        None => String::new(),
    }
}

/// Push `line` unless an identical line is already present
pub(crate) fn push_unique(lines: &mut Vec<String>, line: String) {
    if !lines.contains(&line) {
        lines.push(line);
    }
}
