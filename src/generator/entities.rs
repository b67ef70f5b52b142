//! Entity interface, partial class and implementation under `Jfw.Models/Entities`.

use super::{is_audit_column, models_path, GenContext, GeneratedFile, GENERATED_SUFFIX};
use crate::schema::{Column, ProcedureKind, TableMetadata};
use crate::template::{inheritance_clause, using_block, Replacements};

const INTERFACE_TEMPLATE: &str = include_str!("../../templates/entities/interface.cs.txt");
const PARTIAL_TEMPLATE: &str = include_str!("../../templates/entities/partial.cs.txt");
const IMPLEMENT_TEMPLATE: &str = include_str!("../../templates/entities/implement.cs.txt");

const INTERFACE_COLUMN: &str = r#"        /// <summary>
        /// Gets or sets the [{{entityName}}].[{{columnName}}] column value.
        /// </summary>
        {{columnType}} {{columnNamePascal}} { get; set; }"#;

const INTERFACE_ENCRYPTED_COLUMN: &str = r#"        /// <summary>
        /// Gets or sets the [{{entityName}}].[{{columnName}}] column decrypted value.
        /// </summary>
        /// <remarks>
        /// This property is used to get or set the encrypted property [{{entityName}}].[{{columnName}}] value.
        /// </remarks>
        {{columnType}} {{columnNamePascal}} { get; set; }

        /// <summary>
        /// Gets the [{{entityName}}].[{{columnName}}] column raw value.
        /// </summary>
        /// <remarks>
        /// This property is used to interact with the database column value directly.
        /// </remarks>
        {{columnType}} Encrypted{{columnNamePascal}} { get; }"#;

const PARTIAL_PARAMETER: &str = "                new KeyValuePair<string, object>(Column.{{columnNamePascal}}, {{columnNamePascal}}{{defaultValue}})";
const PARTIAL_ENCRYPTED_PARAMETER: &str = "                new KeyValuePair<string, object>(Column.{{columnNamePascal}}, Encrypted{{columnNamePascal}}{{defaultValue}})";
const PARTIAL_COLUMN_PARSE: &str = "                {{columnNamePascal}} = dataRow.Field<{{columnType}}>(tablePrefix + Column.{{columnNamePascal}});";
const PARTIAL_ENCRYPTED_COLUMN_PARSE: &str = "                Encrypted{{columnNamePascal}} = dataRow.Field<{{columnType}}>(tablePrefix + Column.{{columnNamePascal}});";
const PARTIAL_COLUMN_CONSTANT: &str = r#"            /// <summary>
            /// Maps to the name of column [{{columnName}}] in the table.
            /// </summary>
            public const string {{columnNamePascal}} = "{{columnName}}";"#;

const IMPLEMENT_ENCRYPTED_FIELD: &str = r#"        private {{columnType}} _{{columnNameCamel}} = string.Empty;
        private string _encrypted{{columnNamePascal}} = string.Empty;"#;
const IMPLEMENT_COLUMN: &str = "        public {{columnType}} {{columnNamePascal}} { get; set; }";
const IMPLEMENT_ENCRYPTED_COLUMN: &str = r#"        public string {{columnNamePascal}}
        {
            get => _{{columnNameCamel}};
            set
            {
                // {{columnNamePascal}} should be case-insensitive, thus we use lowercase string.
                _{{columnNameCamel}} = !string.IsNullOrWhiteSpace(value) ? value{{toLower}}.Trim() : string.Empty;

                try
                {
                    // Try to encrypt the value to _encrypted{{columnNamePascal}}.
                    _encrypted{{columnNamePascal}} = CryptographyHelper.Encrypt(_{{columnNameCamel}});
                }
                catch (ArgumentNullException)
                {
                    // If the value is null or empty, we set the encrypted {{columnNamePascal}} to empty string.
                    _encrypted{{columnNamePascal}} = string.Empty;
                }
            }
        }

        public string Encrypted{{columnNamePascal}}
        {
            get => _encrypted{{columnNamePascal}};
            protected set
            {
                // Sets the encrypted value to string.Empty if the value is null or white space.
                if (string.IsNullOrWhiteSpace(value))
                {
                    _encrypted{{columnNamePascal}} = string.Empty;
                    _{{columnNameCamel}} = string.Empty;
                    return;
                }

                try
                {
                    // Try to decrypt the value to _{{columnNameCamel}}.
                    _{{columnNameCamel}} = CryptographyHelper.Decrypt(value);
                    _encrypted{{columnNamePascal}} = value;
                }
                catch (Exception ex)
                {
                    _logger.Error(ex, CryptographyHelper.ErrorMessageDecryptFailed, nameof(Encrypted{{columnNamePascal}}), value);
                    _{{columnNameCamel}} = string.Empty;
                    _encrypted{{columnNamePascal}} = string.Empty;
                }
            }
        }"#;

const PARTIAL_USINGS: [&str; 4] = [
    "System",
    "System.Collections.Generic",
    "System.Data",
    "Jfw.Models.Entities.Interfaces",
];

/// Generate the three entity files for every table.
pub fn generate_entities(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for (name, table) in gen.tables() {
        files.push(entity_interface(gen, name, table));
        files.push(entity_partial(gen, name, table));
        files.push(entity_implement(gen, name, table));
    }
    files
}

fn column_replacements(entity: &str, column: &Column, column_type: &str) -> Replacements {
    Replacements::new()
        .with("entityName", entity)
        .with("columnName", column.name.as_str())
        .with("columnNamePascal", column.name_pascal.as_str())
        .with("columnNameCamel", column.name_camel.as_str())
        .with("columnType", column_type)
}

fn entity_interface(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> GeneratedFile {
    let mut usings: Vec<&str> = Vec::new();
    let mut inherited = vec![format!("IBaseEntity<I{name}Entity>")];
    let mut columns = Vec::new();

    for column in &table.columns {
        if column.name == "ID" || is_audit_column(&column.name) {
            continue;
        }
        if column.name == "Is_System" {
            inherited.push("IHasIsSystem".to_string());
            continue;
        }
        if column.is_date_time() && !usings.contains(&"System") {
            usings.push("System");
        }
        let fragment = if column.is_encrypted {
            INTERFACE_ENCRYPTED_COLUMN
        } else {
            INTERFACE_COLUMN
        };
        let r = column_replacements(name, column, &column.nullable_dot_net_type());
        columns.push(gen.render(fragment, &r));
    }

    let r = Replacements::new()
        .with("EntityName", name)
        .with("Usings", using_block(&usings))
        .with("InheritedInterfaces", inheritance_clause(&inherited))
        .with("ColumnDefinitions", columns.join("\n\n"));
    GeneratedFile::generated(
        models_path(&["Entities", "Interfaces"], &format!("I{name}Entity{GENERATED_SUFFIX}.cs")),
        gen.render(INTERFACE_TEMPLATE, &r),
    )
}

/// `?? default` suffix for an Insert/Update parameter value
fn parameter_default(column: &Column) -> String {
    if column.name == "Is_System" {
        return String::new();
    }
    match (&column.default_value, column.is_nullable) {
        (Some(value), _) => format!(" ?? {value}"),
        (None, true) => " ?? (object)DBNull.Value".to_string(),
        (None, false) => String::new(),
    }
}

fn procedure_parameters(
    gen: &GenContext<'_>,
    name: &str,
    table: &TableMetadata,
    kind: ProcedureKind,
) -> Vec<String> {
    let Some(procedure) = table.procedure(kind) else {
        if !table.procedures.is_empty() {
            tracing::info!(table = name, procedure = %kind, "Procedure is not defined");
        }
        return Vec::new();
    };

    procedure
        .parameters
        .iter()
        .filter_map(|parameter| {
            let Some(column) = table.column_by_pascal(&parameter.name_pascal) else {
                tracing::warn!(
                    table = name,
                    parameter = %parameter.name,
                    "No column matches procedure parameter"
                );
                return None;
            };
            let fragment = if column.is_encrypted {
                PARTIAL_ENCRYPTED_PARAMETER
            } else {
                PARTIAL_PARAMETER
            };
            let r = Replacements::new()
                .with("columnNamePascal", parameter.name_pascal.as_str())
                .with("defaultValue", parameter_default(column));
            Some(gen.render(fragment, &r))
        })
        .collect()
}

fn entity_partial(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> GeneratedFile {
    let mut constants = Vec::new();
    let mut parsings = Vec::new();

    for column in &table.columns {
        // ID is declared on BaseEntity.Column
        if column.name != "ID" {
            let r = column_replacements(name, column, &column.data_type_dot_net);
            constants.push(gen.render(PARTIAL_COLUMN_CONSTANT, &r));
        }
        let fragment = if column.is_encrypted {
            PARTIAL_ENCRYPTED_COLUMN_PARSE
        } else {
            PARTIAL_COLUMN_PARSE
        };
        let r = column_replacements(name, column, &column.data_type_dot_net);
        parsings.push(gen.render(fragment, &r));
    }

    let insert = procedure_parameters(gen, name, table, ProcedureKind::Insert);
    let update = procedure_parameters(gen, name, table, ProcedureKind::Update);

    let r = Replacements::new()
        .with("EntityName", name)
        .with("Usings", using_block(&PARTIAL_USINGS))
        .with("ColumnDefinitions", constants.join("\n\n"))
        .with("ColumnParseDefinitions", parsings.join("\n"))
        .with("InsertParameters", insert.join(",\n"))
        .with("UpdateParameters", update.join(",\n"));
    GeneratedFile::generated(
        models_path(&["Entities", "Implements"], &format!("{name}Entity{GENERATED_SUFFIX}.cs")),
        gen.render(PARTIAL_TEMPLATE, &r),
    )
}

fn entity_implement(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> GeneratedFile {
    let mut usings: Vec<&str> = vec!["Jfw.Models.Entities.Interfaces"];
    let mut fields = vec![String::new()];
    let mut columns = Vec::new();

    for column in &table.columns {
        let mut to_lower = "";
        let column_type = match column.name.as_str() {
            "ID" | "Is_System" | "Modified_Date" | "Created_Date" => column.data_type_dot_net.clone(),
            "Username" | "Email_Address" => {
                to_lower = ".ToLower()";
                column.data_type_dot_net.clone()
            }
            _ => column.nullable_dot_net_type(),
        };

        if column.is_encrypted && !usings.contains(&"Jfw.Helpers") {
            usings.insert(0, "Jfw.Helpers");
        }
        if column.is_date_time() && !usings.contains(&"System") {
            usings.insert(0, "System");
        }

        let r = column_replacements(name, column, &column_type).with("toLower", to_lower);
        if column.is_encrypted {
            fields.push(gen.render(IMPLEMENT_ENCRYPTED_FIELD, &r));
            columns.push(gen.render(IMPLEMENT_ENCRYPTED_COLUMN, &r));
        } else {
            columns.push(gen.render(IMPLEMENT_COLUMN, &r));
        }
    }
    if fields.len() > 1 {
        fields.push(String::new());
    }

    let r = Replacements::new()
        .with("EntityName", name)
        .with("Usings", using_block(&usings))
        .with("ColumnDefinitions", columns.join("\n\n"))
        .with("EncryptedFields", fields.join("\n"));
    GeneratedFile::generated(
        models_path(&["Entities", "Implements"], &format!("{name}Entity.cs")),
        gen.render(IMPLEMENT_TEMPLATE, &r),
    )
}
