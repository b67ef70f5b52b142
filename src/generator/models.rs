//! Model interfaces under `Jfw.Core/EntityClasses/Interfaces`.

use super::{core_path, GenContext, GeneratedFile, GENERATED_SUFFIX};
use crate::schema::TableMetadata;
use crate::template::{inheritance_clause, using_block, Replacements};

const MODEL_INTERFACE_TEMPLATE: &str = include_str!("../../templates/models/model_interface.cs.txt");
const ENTITY_CLASS_INTERFACES_TEMPLATE: &str =
    include_str!("../../templates/models/entity_class_interfaces.cs.txt");

const MODEL_COLUMN: &str = r#"        /// <summary>
        /// Gets or sets the [{{entityName}}].[{{columnName}}] column value.
        /// </summary>
        {{columnType}} {{columnNamePascal}} { get; {{setter}}}"#;

const MODEL_ENCRYPTED_COLUMN: &str = r#"        /// <summary>
        /// Gets or sets the [{{entityName}}].[{{columnName}}] column's decrypted value.
        /// </summary>
        string {{columnNamePascal}} { get; set; }

        /// <summary>
        /// Gets the [{{entityName}}].[{{columnName}}] column's raw value.
        /// </summary>
        string Encrypted{{columnNamePascal}} { get; }"#;

const ENTITY_CLASS_INTERFACE: &str = r#"    /// <summary>
    /// Entity class interface of [{{entityName}}].
    /// </summary>
    public partial interface I{{entityName}} : IBaseEntityClass, I{{entityName}}Model
    {
    }"#;

/// Generate `IEntityClassInterfaces` and one model interface per table.
pub fn generate_models(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    let mut files = vec![entity_class_interfaces(gen)];
    for (name, table) in gen.tables() {
        files.push(model_interface(gen, name, table));
    }
    files
}

fn entity_class_interfaces(gen: &GenContext<'_>) -> GeneratedFile {
    let interfaces: Vec<String> = gen
        .tables()
        .map(|(name, _)| gen.render(ENTITY_CLASS_INTERFACE, &Replacements::new().with("entityName", name)))
        .collect();
    let r = Replacements::new().with("InterfaceDefinitions", interfaces.join("\n\n"));
    GeneratedFile::generated(
        core_path(
            &["EntityClasses", "Interfaces"],
            &format!("IEntityClassInterfaces{GENERATED_SUFFIX}.cs"),
        ),
        gen.render(ENTITY_CLASS_INTERFACES_TEMPLATE, &r),
    )
}

fn model_interface(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> GeneratedFile {
    let inherited: Vec<String> = gen
        .config
        .children_of(name)
        .iter()
        .map(|child| format!("I{child}Model"))
        .collect();

    let mut ignored: Vec<&str> = vec!["ID"];
    if let Some(child) = gen.config.child_tables.get(name) {
        ignored.extend(child.ignored_columns.iter().map(String::as_str));
    }

    let mut usings: Vec<&str> = Vec::new();
    let mut columns = Vec::new();
    for column in &table.columns {
        if ignored.contains(&column.name.as_str()) {
            continue;
        }
        let column_type = match column.name.as_str() {
            "Is_System" | "Modified_Date" | "Created_Date" => column.data_type_dot_net.clone(),
            _ if !column.is_nullable && !column.is_string() => format!("{}?", column.data_type_dot_net),
            _ => column.data_type_dot_net.clone(),
        };
        if column.is_date_time() && !usings.contains(&"System") {
            usings.push("System");
        }

        let fragment = if column.is_encrypted {
            MODEL_ENCRYPTED_COLUMN
        } else {
            MODEL_COLUMN
        };
        let r = Replacements::new()
            .with("entityName", name)
            .with("columnName", column.name.as_str())
            .with("columnNamePascal", column.name_pascal.as_str())
            .with("columnType", column_type)
            .with("setter", if column.is_read_only { "" } else { "set; " });
        columns.push(gen.render(fragment, &r));
    }

    let r = Replacements::new()
        .with("EntityName", name)
        .with("Usings", using_block(&usings))
        .with("ColumnDefinitions", columns.join("\n\n"))
        .with("InheritedInterfaces", inheritance_clause(&inherited));
    GeneratedFile::generated(
        core_path(
            &["EntityClasses", "Interfaces", "Models"],
            &format!("I{name}Model{GENERATED_SUFFIX}.cs"),
        ),
        gen.render(MODEL_INTERFACE_TEMPLATE, &r),
    )
}
