use super::load::load_records;
use super::types::{Column, Parameter, Procedure, Schema, TableMetadata};
use crate::config::GeneratorConfig;
use heck::ToLowerCamelCase;
use serde::Deserialize;
use std::path::Path;

/// Columns every table treats as read-only
const READ_ONLY_COLUMNS: [&str; 4] = ["ID", "Is_System", "Modified_Date", "Created_Date"];

/// .NET type used when a SQL type has no mapping
const FALLBACK_DOT_NET_TYPE: &str = "object";

/// One row of the column information query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnRecord {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub max_length: i64,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// One row of the procedure parameter query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterRecord {
    pub procedure_name: String,
    pub parameter_name: String,
    pub data_type: String,
    #[serde(default)]
    pub max_length: i64,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// camelCase of a column or parameter name (`Is_iOS` becomes `isIOS`).
pub fn camel_name(raw: &str) -> String {
    raw.replace("_iOS", "iO_s").to_lower_camel_case()
}

/// `camel_name` with the first character upper-cased.
pub fn pascal_name(raw: &str) -> String {
    upper_first(&camel_name(raw))
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// SQL type with its length for character types, e.g. `nvarchar(MAX)`.
pub fn sql_type_with_length(data_type: &str, max_length: i64) -> String {
    match data_type {
        "nvarchar" | "varchar" | "char" | "nchar" => {
            if max_length < 0 {
                format!("{data_type}(MAX)")
            } else {
                format!("{data_type}({max_length})")
            }
        }
        _ => data_type.to_string(),
    }
}

fn bool_default(dot_net: &str, value: String) -> String {
    if dot_net != "bool" {
        return value;
    }
    match value.as_str() {
        "0" => "false".to_string(),
        "1" => "true".to_string(),
        _ => value,
    }
}

fn map_type(config: &GeneratorConfig, data_type: &str) -> String {
    match config.type_mapping.get(data_type) {
        Some(t) => t.clone(),
        None => {
            tracing::warn!(data_type, "No .NET mapping for SQL type, using object");
            FALLBACK_DOT_NET_TYPE.to_string()
        }
    }
}

fn build_column(config: &GeneratorConfig, record: &ColumnRecord) -> Column {
    let mut dot_net = map_type(config, &record.data_type);
    let default_value = record
        .default_value
        .as_deref()
        .map(|v| bool_default(&dot_net, v.replace(['(', ')'], "")));

    if record.is_nullable && dot_net != "string" {
        dot_net.push('?');
    }

    let mut column = Column {
        name: record.column_name.clone(),
        name_camel: camel_name(&record.column_name),
        name_pascal: pascal_name(&record.column_name),
        data_type_sql: record.data_type.clone(),
        data_type_sql_with_length: sql_type_with_length(&record.data_type, record.max_length),
        data_type_dot_net: dot_net,
        default_value,
        is_nullable: record.is_nullable,
        is_encrypted: false,
        is_read_only: READ_ONLY_COLUMNS.contains(&record.column_name.as_str()),
        is_protected: false,
    };

    for flag in config.flags_for(&record.table_name, &record.column_name) {
        column.is_encrypted |= flag.encrypted;
        column.is_read_only |= flag.read_only;
        column.is_protected |= flag.protected;
    }
    column
}

fn build_parameter(config: &GeneratorConfig, record: &ParameterRecord) -> Parameter {
    let dot_net = map_type(config, &record.data_type);
    let default_value = bool_default(
        &dot_net,
        record.default_value.as_deref().unwrap_or("").replace('\r', ""),
    );
    Parameter {
        name: record.parameter_name.clone(),
        name_camel: camel_name(&record.parameter_name),
        name_pascal: pascal_name(&record.parameter_name),
        data_type_sql: record.data_type.clone(),
        data_type_sql_with_length: sql_type_with_length(&record.data_type, record.max_length),
        data_type_dot_net: dot_net,
        is_required: default_value.is_empty(),
        default_value,
    }
}

/// Assemble a [`Schema`] from the raw column and parameter records.
///
/// Procedure names follow `{prefix}_{Table}_{Kind}`. Procedures whose table is
/// unknown are logged and skipped.
pub fn build_schema(
    config: &GeneratorConfig,
    columns: &[ColumnRecord],
    parameters: &[ParameterRecord],
) -> Schema {
    let mut schema = Schema::default();

    for record in columns {
        schema
            .tables
            .entry(record.table_name.clone())
            .or_insert_with(TableMetadata::default)
            .columns
            .push(build_column(config, record));
    }

    for record in parameters {
        let mut parts = record.procedure_name.split('_');
        let (Some(_prefix), Some(table_name), Some(kind)) = (parts.next(), parts.next(), parts.next())
        else {
            tracing::error!(procedure = %record.procedure_name, "Unexpected procedure name format");
            continue;
        };

        let Some(table) = schema.tables.get_mut(table_name) else {
            tracing::error!(
                procedure = %record.procedure_name,
                table = table_name,
                "Procedure name does not match any table"
            );
            continue;
        };

        let procedure = table
            .procedures
            .entry(kind.to_string())
            .or_insert_with(|| Procedure {
                key: format!("{}{}", table_name, pascal_name(kind)),
                name: record.procedure_name.clone(),
                name_with_schema: format!("[{}].[{}]", config.table_schema, record.procedure_name),
                parameters: Vec::new(),
            });
        procedure.parameters.push(build_parameter(config, record));
    }

    schema
}

/// Read both record files and build the schema.
pub fn import_schema(
    config: &GeneratorConfig,
    column_info: &Path,
    procedure_info: &Path,
) -> anyhow::Result<Schema> {
    let columns: Vec<ColumnRecord> = load_records(column_info)?;
    let parameters: Vec<ParameterRecord> = load_records(procedure_info)?;
    tracing::info!(
        columns = columns.len(),
        parameters = parameters.len(),
        "Processing raw table metadata"
    );
    Ok(build_schema(config, &columns, &parameters))
}
