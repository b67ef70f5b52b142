use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stored procedure kinds the generator knows how to emit and check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcedureKind {
    Insert,
    Update,
    Delete,
    Get,
    List,
    View,
}

impl ProcedureKind {
    pub const ALL: [ProcedureKind; 6] = [
        ProcedureKind::Insert,
        ProcedureKind::Update,
        ProcedureKind::Delete,
        ProcedureKind::Get,
        ProcedureKind::List,
        ProcedureKind::View,
    ];

    /// Key used in the `procedures` map of `tables.json`
    pub fn key(self) -> &'static str {
        match self {
            ProcedureKind::Insert => "Insert",
            ProcedureKind::Update => "Update",
            ProcedureKind::Delete => "Delete",
            ProcedureKind::Get => "Get",
            ProcedureKind::List => "List",
            ProcedureKind::View => "View",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A table column as stored in `tables.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub name_camel: String,
    pub name_pascal: String,
    pub data_type_sql: String,
    pub data_type_sql_with_length: String,
    #[serde(default)]
    pub data_type_dot_net: String,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub is_protected: bool,
}

impl Column {
    /// .NET type with a trailing `?` unless it is already nullable or a `string`.
    pub fn nullable_dot_net_type(&self) -> String {
        nullable_type(&self.data_type_dot_net)
    }

    /// True for `DateTime` and `DateTime?` columns.
    pub fn is_date_time(&self) -> bool {
        self.data_type_dot_net.trim_end_matches('?') == "DateTime"
    }

    pub fn is_string(&self) -> bool {
        self.data_type_dot_net == "string"
    }

    /// `ID` or a foreign key such as `Brand_ID`.
    pub fn is_identifier(&self) -> bool {
        self.name == "ID" || self.name.contains("_ID")
    }
}

/// Appends `?` to a .NET type unless it is already nullable or a reference `string`.
pub fn nullable_type(dot_net: &str) -> String {
    if dot_net.contains('?') || dot_net == "string" {
        dot_net.to_string()
    } else {
        format!("{dot_net}?")
    }
}

/// A stored procedure parameter as stored in `tables.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub name_camel: String,
    pub name_pascal: String,
    pub data_type_sql: String,
    pub data_type_sql_with_length: String,
    #[serde(default)]
    pub data_type_dot_net: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    /// Constant name, e.g. `UserInsert`
    pub key: String,
    /// Database name, e.g. `asp_User_Insert`
    pub name: String,
    /// Schema-qualified name, e.g. `[JFW].[asp_User_Insert]`
    pub name_with_schema: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// Columns and stored procedures of a single table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub procedures: BTreeMap<String, Procedure>,
}

impl TableMetadata {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_by_pascal(&self, name_pascal: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name_pascal == name_pascal)
    }

    pub fn procedure(&self, kind: ProcedureKind) -> Option<&Procedure> {
        self.procedures.get(kind.key())
    }
}

/// Include/exclude lists applied when walking the schema
#[derive(Debug, Clone, Copy)]
pub struct TableFilter<'a> {
    pub included: &'a [String],
    pub excluded: &'a [String],
}

impl TableFilter<'_> {
    pub fn allows(&self, table: &str) -> bool {
        if !self.included.is_empty() && !self.included.iter().any(|t| t == table) {
            return false;
        }
        !self.excluded.iter().any(|t| t == table)
    }
}

/// Every table in `tables.json`, keyed and ordered by table name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub tables: BTreeMap<String, TableMetadata>,
}

impl Schema {
    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.get(name)
    }

    /// Tables allowed by `filter`, in name order.
    pub fn walk<'a>(
        &'a self,
        filter: TableFilter<'a>,
    ) -> impl Iterator<Item = (&'a str, &'a TableMetadata)> + 'a {
        self.tables
            .iter()
            .filter(move |(name, _)| filter.allows(name))
            .map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
