//! Entity classes under `Jfw.Core/EntityClasses/{subfolder}`.
//!
//! Every table gets the six hand-edited partial class files (constructor,
//! constants, exceptions, errors, overrides and validations). Tables that
//! are not child tables also get a `{T}.Properties.cs` file that forwards
//! properties to the attached entity, plus one `{T}.Properties.{Suffix}.cs`
//! file per configured child table.

use super::{core_path, GenContext, GeneratedFile};
use crate::config::CORE_SUFFIXES;
use crate::schema::{Column, TableMetadata};
use crate::template::{using_block, Replacements};
use std::path::PathBuf;

const PROPERTIES_TEMPLATE: &str = include_str!("../../templates/entity_classes/properties.cs.txt");

/// Hand-edited templates, in the order of [`CORE_SUFFIXES`]
const CORE_TEMPLATES: [&str; 6] = [
    include_str!("../../templates/entity_classes/constructor.cs.txt"),
    include_str!("../../templates/entity_classes/constants.cs.txt"),
    include_str!("../../templates/entity_classes/exceptions.cs.txt"),
    include_str!("../../templates/entity_classes/errors.cs.txt"),
    include_str!("../../templates/entity_classes/overrides.cs.txt"),
    include_str!("../../templates/entity_classes/validations.cs.txt"),
];

const DEFAULT_USINGS: [&str; 5] = [
    "System",
    "Jfw.Core.EntityClasses.Interfaces",
    "Jfw.Models.Entities.Implements",
    "Jfw.Models.Entities.Interfaces",
    "Jfw.Repositories.Interfaces",
];

const CHILD_USINGS: [&str; 3] = [
    "System",
    "Jfw.Models.Entities.Implements",
    "Jfw.Models.Entities.Interfaces",
];

const PARTIAL_CLASS: &str = r#"    /// <summary>
    /// This class holds all data related to {{EntityName}} and provides methods to work with {{EntityName}}.
    /// </summary>
    public partial class C{{EntityName}} : BaseEntityClass<C{{EntityName}}, I{{EntityName}}Repository, I{{EntityName}}Entity>, I{{EntityName}}
    {
        private I{{EntityName}}Entity _attachedEntity = new {{EntityName}}Entity();

        internal override I{{EntityName}}Entity AttachedEntity
        {
            get => _attachedEntity;
            set => _attachedEntity = value?.Clone() ?? new {{EntityName}}Entity();
        }"#;

const PARTIAL_CLASS_CHILD: &str = r#"    public partial class C{{ParentEntityName}}
    {
        private I{{EntityName}}Entity _attached{{EntityName}}Entity = new {{EntityName}}Entity();

        internal I{{EntityName}}Entity Attached{{EntityName}}Entity
        {
            get => _attached{{EntityName}}Entity;
            set => _attached{{EntityName}}Entity = value?.Clone() ?? new {{EntityName}}Entity();
        }"#;

const PROPERTY_HEAD: &str = r#"        /// <inheritdoc />
        public {{columnType}} {{columnNamePascal}}"#;

const FULL_ACCESSOR_BODY: &str = r#"
        {
            get => Attached{{childTable}}Entity.{{columnNamePascal}};
            set => Attached{{childTable}}Entity.{{columnNamePascal}} = value;
        }"#;

const PROTECTED_BODY: &str = r#"
        {
            get => Attached{{childTable}}Entity.{{columnNamePascal}};
            protected set => Attached{{childTable}}Entity.{{columnNamePascal}} = value;
        }"#;

const READ_ONLY_BODY: &str = " => AttachedEntity.{{columnNamePascal}};";

const EXTENDED_ACCESSOR_BODY: &str = r#"
        {
            get => AttachedEntity.{{columnNamePascal}};
            set
            {
                AttachedEntity.{{columnNamePascal}} = value;
{{ExtraSetters}}
            }
        }"#;

const PROPERTY_ENCRYPTED: &str = r#"        /// <inheritdoc />
        public {{columnType}} {{columnNamePascal}}
        {
            get => Attached{{childTable}}Entity.{{columnNamePascal}};
            set => Attached{{childTable}}Entity.{{columnNamePascal}} = value;
        }

        /// <inheritdoc />
        [System.Text.Json.Serialization.JsonIgnore]
        [Newtonsoft.Json.JsonIgnore]
        public string Encrypted{{columnNamePascal}} => Attached{{childTable}}Entity.Encrypted{{columnNamePascal}};"#;

const PROPERTY_EXTENDED_ID: &str = r#"        /// <inheritdoc cref="IBaseEntityClass.Id" />
        public override long Id
        {
            get => AttachedEntity.Id;
            protected set
            {
                AttachedEntity.Id = value;
{{ExtraSetters}}
            }
        }"#;

const EXTRA_SETTER: &str =
    "                Attached{{childTable}}Entity.{{entityName}}{{columnNamePascal}} = value;";

const METHOD_GET: &str = r#"        /// <summary>
        /// Gets the value of <see cref="{{columnNamePascal}}"/>.
        /// </summary>
        /// <remarks>
        /// <description>Recommend to use property <see cref="{{columnNamePascal}}"/>.</description>
        /// </remarks>
        [Obsolete("Use property {{columnNamePascal}} instead.")]
        public {{columnType}} Get{{columnNamePascal}}()
        {
            return {{columnNamePascal}};
        }"#;

const METHOD_GET_ENCRYPTED_RAW: &str = r#"

        /// <summary>
        /// Gets the value of <see cref="Encrypted{{columnNamePascal}}"/>.
        /// </summary>
        /// <remarks>
        /// <description>Recommend to use property <see cref="Encrypted{{columnNamePascal}}"/>.</description>
        /// </remarks>
        [Obsolete("Use property Encrypted{{columnNamePascal}} instead.")]
        public string GetEncrypted{{columnNamePascal}}()
        {
            return Encrypted{{columnNamePascal}};
        }"#;

const METHOD_SET: &str = r#"        /// <summary>
        /// Sets the value of <see cref="{{columnNamePascal}}"/>.<br/>
        /// </summary>
        /// <remarks>
        /// <description>Recommend to use property <see cref="{{columnNamePascal}}"/>.</description>
        /// </remarks>
        [Obsolete("Use property {{columnNamePascal}} instead.")]
        public void Set{{columnNamePascal}}({{columnType}} value)
        {
            {{columnNamePascal}} = value;
        }"#;

/// Generate the entity class files of every table.
pub fn generate_entity_classes(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for (name, table) in gen.tables() {
        files.extend(core_templates(gen, name));
        if gen.config.is_child_table(name) {
            continue;
        }
        files.extend(properties_files(gen, name, table));
    }
    files
}

fn entity_class_path(gen: &GenContext<'_>, table: &str, file: &str) -> PathBuf {
    core_path(&["EntityClasses", gen.config.table_path(table)], file)
}

fn core_templates(gen: &GenContext<'_>, name: &str) -> Vec<GeneratedFile> {
    CORE_SUFFIXES
        .iter()
        .zip(CORE_TEMPLATES.iter())
        .filter(|(suffix, _)| gen.config.allows_core_suffix(suffix))
        .map(|(suffix, template)| {
            let r = Replacements::new().with("entityName", name);
            GeneratedFile::user_owned(
                entity_class_path(gen, name, &format!("{name}{suffix}.cs")),
                gen.render(template, &r),
            )
        })
        .collect()
}

/// Collects property and accessor method definitions for one output file
struct PropertyWriter<'g, 'a> {
    gen: &'g GenContext<'a>,
    entity: &'g str,
    children: &'a [String],
    ignored_child_columns: Vec<String>,
    properties: Vec<String>,
    methods: Vec<String>,
}

impl PropertyWriter<'_, '_> {
    fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Property type: nullable unless the framework owns the column
    fn column_type(column: &Column) -> String {
        match column.name.as_str() {
            "Is_System" | "Modified_Date" | "Created_Date" => column.data_type_dot_net.clone(),
            _ if !column.data_type_dot_net.contains('?') && !column.is_string() => {
                format!("{}?", column.data_type_dot_net)
            }
            _ => column.data_type_dot_net.clone(),
        }
    }

    fn extra_setters(&self, entity: &str, column: &Column) -> String {
        self.children
            .iter()
            .map(|child| {
                let r = Replacements::new()
                    .with("entityName", entity)
                    .with("childTable", child.as_str())
                    .with("columnNamePascal", column.name_pascal.as_str());
                self.gen.render(EXTRA_SETTER, &r)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn process(&mut self, column: &Column, child: Option<&str>) {
        if column.name == "ID" && !self.has_children() {
            return;
        }
        if child.is_some() && self.ignored_child_columns.contains(&column.name) {
            return;
        }

        let r = Replacements::new()
            .with("entityName", self.entity)
            .with("childTable", child.unwrap_or(""))
            .with("columnNamePascal", column.name_pascal.as_str())
            .with("columnType", Self::column_type(column));

        let mut property: Option<String> = None;
        if self.has_children() && child.is_none() {
            match column.name.as_str() {
                "ID" => {
                    let extra = Replacements::new()
                        .with("ExtraSetters", self.extra_setters(self.entity, column));
                    self.properties.push(self.gen.render(PROPERTY_EXTENDED_ID, &extra));
                    return;
                }
                "Modified_By" | "Created_By" => {
                    let body = EXTENDED_ACCESSOR_BODY
                        .replace("{{ExtraSetters}}", &self.extra_setters("", column));
                    property = Some(format!("{PROPERTY_HEAD}{body}"));
                }
                _ => {}
            }
        }

        let (fallback, get, set): (String, Option<String>, bool) = if column.is_encrypted {
            (
                PROPERTY_ENCRYPTED.to_string(),
                Some(format!("{METHOD_GET}{METHOD_GET_ENCRYPTED_RAW}")),
                false,
            )
        } else if column.is_protected {
            // protected columns expose no accessor methods
            (format!("{PROPERTY_HEAD}{PROTECTED_BODY}"), None, false)
        } else if column.is_read_only {
            (format!("{PROPERTY_HEAD}{READ_ONLY_BODY}"), Some(METHOD_GET.to_string()), false)
        } else {
            (
                format!("{PROPERTY_HEAD}{FULL_ACCESSOR_BODY}"),
                Some(METHOD_GET.to_string()),
                true,
            )
        };

        let property = property.unwrap_or(fallback);
        self.properties.push(self.gen.render(&property, &r));
        if let Some(get) = get {
            self.methods.push(self.gen.render(&get, &r));
        }
        if set {
            self.methods.push(self.gen.render(METHOD_SET, &r));
        }
    }

    /// Render the collected definitions and reset them for the next file
    fn finish(&mut self, entity: &str, partial_class: String, usings: &[&str]) -> String {
        let r = Replacements::new()
            .with("EntityName", entity)
            .with("PartialClass", partial_class)
            .with("Usings", using_block(usings))
            .with("PropertyDefinitions", self.properties.join("\n\n"))
            .with("MethodDefinitions", self.methods.join("\n\n"));
        self.properties.clear();
        self.methods.clear();
        self.gen.render(PROPERTIES_TEMPLATE, &r)
    }
}

fn properties_files(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> Vec<GeneratedFile> {
    let mut writer = PropertyWriter {
        gen,
        entity: name,
        children: gen.config.children_of(name),
        ignored_child_columns: vec!["ID".to_string()],
        properties: Vec::new(),
        methods: Vec::new(),
    };

    for column in &table.columns {
        writer.process(column, None);
    }
    let partial = gen.render(PARTIAL_CLASS, &Replacements::new().with("EntityName", name));
    let mut files = vec![GeneratedFile::generated(
        entity_class_path(gen, name, &format!("{name}.Properties.cs")),
        writer.finish(name, partial, &DEFAULT_USINGS),
    )];

    for child in writer.children {
        let (Some(child_table), Some(child_config)) =
            (gen.schema.table(child), gen.config.child_tables.get(child))
        else {
            tracing::warn!(table = name, child = %child, "Child table is not defined, skipping");
            continue;
        };
        // ignored columns accumulate across the children of one parent
        writer
            .ignored_child_columns
            .extend(child_config.ignored_columns.iter().cloned());

        for column in &child_table.columns {
            writer.process(column, Some(child.as_str()));
        }
        let partial = gen.render(
            PARTIAL_CLASS_CHILD,
            &Replacements::new()
                .with("EntityName", child.as_str())
                .with("ParentEntityName", name),
        );
        files.push(GeneratedFile::generated(
            entity_class_path(gen, name, &format!("{name}.Properties.{}.cs", child_config.suffix)),
            writer.finish(child, partial, &CHILD_USINGS),
        ));
    }
    files
}
