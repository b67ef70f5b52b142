use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::schema::TableFilter;

/// Everything that drives a generation run, loaded from `jfw-codegen.toml`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Database schema used in procedure names, e.g. `[JFW].[asp_User_Get]`
    pub table_schema: String,
    /// Tables to generate; empty means all
    pub included_entities: Vec<String>,
    pub excluded_entities: Vec<String>,
    /// EntityClasses template suffixes to generate; empty means all
    pub included_core_suffixes: Vec<String>,
    pub excluded_core_suffixes: Vec<String>,
    pub toggles: Toggles,
    pub author: Author,
    pub paths: Paths,
    /// SQL Server type name to .NET type name
    pub type_mapping: BTreeMap<String, String>,
    /// Sub folder of `Jfw.Core/EntityClasses` per table
    pub table_paths: BTreeMap<String, String>,
    /// Tables whose Delete procedure only flips `[Status]`
    pub soft_delete_tables: Vec<String>,
    /// Tables that get a View procedure
    pub view_tables: Vec<String>,
    pub procedures: BTreeMap<String, ProcedureCustomization>,
    pub child_tables: BTreeMap<String, ChildTable>,
    pub column_flags: Vec<ColumnFlag>,
    pub checks: Checks,
}

/// Per-artefact switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Toggles {
    pub data_access: bool,
    pub repositories: bool,
    pub core_models: bool,
    pub entity_classes: bool,
    pub entity_models: bool,
    pub filters: bool,
    pub procedures: bool,
    pub constants: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            data_access: true,
            repositories: true,
            core_models: true,
            entity_classes: true,
            entity_models: true,
            filters: true,
            procedures: true,
            constants: true,
        }
    }
}

/// Author stamped into every file header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Author {
    pub full_name: String,
    pub dev_code: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            full_name: "Jin Jackson".to_string(),
            dev_code: "dev22".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Table metadata produced by `jfw-gen import`
    pub tables: PathBuf,
    /// Raw column records
    pub column_info: PathBuf,
    /// Raw procedure parameter records
    pub procedure_info: PathBuf,
    /// Root of the generated tree
    pub output: PathBuf,
    /// Framework checkout the generated tree is copied into
    pub framework: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            tables: PathBuf::from("data/tables.json"),
            column_info: PathBuf::from("data/table-column-info.json"),
            procedure_info: PathBuf::from("data/procedure-parameter-info.json"),
            output: PathBuf::from("output"),
            framework: PathBuf::from("../jframework/Framework"),
        }
    }
}

/// Stored procedure customisation for a parent table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcedureCustomization {
    /// Table name to SQL alias used in View procedures
    pub alias: BTreeMap<String, String>,
    /// 1:1 extension tables, see [`ChildTable`]
    pub child_tables: Vec<String>,
    /// Statements placed before the query in View procedures
    pub precondition: Option<String>,
    pub custom_parameters: Vec<CustomParameter>,
}

/// Extra List/View parameter with its own filter SQL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomParameter {
    /// Parameter name without `@`
    pub name: String,
    /// SQL type, e.g. `VARCHAR(MAX)`
    #[serde(rename = "type")]
    pub sql_type: String,
    /// SQL appended to the filter criteria block
    #[serde(default)]
    pub filter_criteria: String,
    /// C# filter property name
    pub property_name: String,
    /// C# filter property type
    pub property_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChildTable {
    /// Suffix of the `{Parent}.Properties.{suffix}.cs` file
    pub suffix: String,
    /// Columns not surfaced on the parent entity class
    pub ignored_columns: Vec<String>,
}

/// Encryption/read-only/protected markers applied on import
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnFlag {
    /// Restrict to one table; `None` matches the column in every table
    #[serde(default)]
    pub table: Option<String>,
    pub column: String,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Checks {
    /// Extra List parameters per table on top of the computed expectation
    pub list_extra_parameters: BTreeMap<String, i64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            table_schema: "JFW".to_string(),
            included_entities: Vec::new(),
            excluded_entities: vec!["LOG4NET".to_string()],
            included_core_suffixes: Vec::new(),
            excluded_core_suffixes: Vec::new(),
            toggles: Toggles::default(),
            author: Author::default(),
            paths: Paths::default(),
            type_mapping: default_type_mapping(),
            table_paths: BTreeMap::new(),
            soft_delete_tables: ["Brand", "Device", "User", "Payment"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            view_tables: ["Brand", "Device", "User"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            procedures: BTreeMap::new(),
            child_tables: BTreeMap::new(),
            column_flags: Vec::new(),
            checks: Checks::default(),
        }
    }
}

/// EntityClasses template suffixes, in generation order
pub const CORE_SUFFIXES: [&str; 6] = [
    "",
    ".Constants",
    ".Exceptions",
    ".Errors",
    ".Overrides",
    ".Validations",
];

/// SQL Server to C# type mapping
pub fn default_type_mapping() -> BTreeMap<String, String> {
    [
        ("bigint", "long"),
        ("binary", "byte[]"),
        ("bit", "bool"),
        ("char", "string"),
        ("date", "DateTime"),
        ("datetime", "DateTime"),
        ("datetime2", "DateTime"),
        ("datetimeoffset", "DateTimeOffset"),
        ("decimal", "decimal"),
        ("float", "double"),
        ("image", "byte[]"),
        ("int", "int"),
        ("money", "decimal"),
        ("nchar", "string"),
        ("ntext", "string"),
        ("numeric", "decimal"),
        ("nvarchar", "string"),
        ("real", "float"),
        ("rowversion", "byte[]"),
        ("smalldatetime", "DateTime"),
        ("smallint", "short"),
        ("smallmoney", "decimal"),
        ("text", "string"),
        ("time", "TimeSpan"),
        ("timestamp", "byte[]"),
        ("tinyint", "byte"),
        ("uniqueidentifier", "Guid"),
        ("varbinary", "byte[]"),
        ("varchar", "string"),
        ("xml", "string"),
    ]
    .iter()
    .map(|(sql, dot_net)| (sql.to_string(), dot_net.to_string()))
    .collect()
}

impl GeneratorConfig {
    pub fn table_filter(&self) -> TableFilter<'_> {
        TableFilter {
            included: &self.included_entities,
            excluded: &self.excluded_entities,
        }
    }

    /// Procedure customisation of `table`, if any
    pub fn customization(&self, table: &str) -> Option<&ProcedureCustomization> {
        self.procedures.get(table)
    }

    /// Child tables configured for `table`; empty when it has none
    pub fn children_of(&self, table: &str) -> &[String] {
        self.procedures
            .get(table)
            .map(|p| p.child_tables.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_child_table(&self, table: &str) -> bool {
        self.child_tables.contains_key(table)
    }

    pub fn is_soft_delete(&self, table: &str) -> bool {
        self.soft_delete_tables.iter().any(|t| t == table)
    }

    pub fn has_view(&self, table: &str) -> bool {
        self.view_tables.iter().any(|t| t == table)
    }

    /// Whether the EntityClasses template with `suffix` should be generated
    pub fn allows_core_suffix(&self, suffix: &str) -> bool {
        if !self.included_core_suffixes.is_empty()
            && !self.included_core_suffixes.iter().any(|s| s == suffix)
        {
            return false;
        }
        !self.excluded_core_suffixes.iter().any(|s| s == suffix)
    }

    /// Sub folder of `Jfw.Core/EntityClasses` for `table`
    pub fn table_path(&self, table: &str) -> &str {
        self.table_paths.get(table).map(String::as_str).unwrap_or("")
    }

    /// Flags configured for `table.column`
    pub fn flags_for(&self, table: &str, column: &str) -> impl Iterator<Item = &ColumnFlag> {
        let table = table.to_string();
        let column = column.to_string();
        self.column_flags.iter().filter(move |f| {
            f.column == column && f.table.as_deref().map(|t| t == table).unwrap_or(true)
        })
    }
}
