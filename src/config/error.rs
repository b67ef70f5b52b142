use std::fmt;

/// Generator configuration error
///
/// Returned by `GeneratorConfig::validate()` when the configuration cannot
/// produce consistent output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `table_schema` is empty
    EmptyTableSchema,
    /// A core suffix filter names a template that does not exist
    UnknownCoreSuffix {
        /// The unknown suffix
        suffix: String,
    },
    /// A parent lists a child table that has no `[child_tables.*]` entry
    MissingChildTable {
        /// Parent table
        parent: String,
        /// Child table without configuration
        child: String,
    },
    /// A child table entry has no suffix
    EmptyChildSuffix {
        /// Child table
        child: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyTableSchema => {
                write!(f, "Configuration error: table_schema must not be empty")
            }
            ConfigError::UnknownCoreSuffix { suffix } => {
                write!(
                    f,
                    "Configuration error: Unknown EntityClasses suffix '{}'. \
                    Expected one of: \"\", .Constants, .Exceptions, .Errors, .Overrides, .Validations",
                    suffix
                )
            }
            ConfigError::MissingChildTable { parent, child } => {
                write!(
                    f,
                    "Configuration error: procedures.{} lists child table '{}' \
                    but there is no [child_tables.{}] entry",
                    parent, child, child
                )
            }
            ConfigError::EmptyChildSuffix { child } => {
                write!(
                    f,
                    "Configuration error: child_tables.{} must define a suffix",
                    child
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
