//! List filters under `Jfw.Models/Filters`.
//!
//! A filter exposes one property per searchable column plus the custom
//! parameters configured for the table. Columns of child tables are folded
//! into the parent filter. Identifier columns (`UID`, `*_ID`) are passed to
//! SQL as comma separated strings and get list setters.

use super::{models_path, GenContext, GeneratedFile, GENERATED_SUFFIX};
use crate::config::CustomParameter;
use crate::schema::{Column, TableMetadata};
use crate::template::{inheritance_clause, using_block, Replacements};

const FILTER_TEMPLATE: &str = include_str!("../../templates/filters/filter.cs.txt");

const DEFAULT_USINGS: [&str; 2] = ["System.Collections.Generic", "Jfw.Models.Filters.Interfaces"];

const COLUMN: &str = r#"        /// <summary>
        /// Gets or sets the filter value of [{{columnName}}].
        /// </summary>
        {{columnType}} {{columnNamePascal}} { get; set; }"#;

const PARAMETER: &str = r#"            public const string {{columnNamePascal}} = "@{{columnName}}";"#;

const SHORT_COLUMN: &str = "        public {{columnType}} {{columnNamePascal}} { get; set; }";

const SETTER_INTERFACE: &str = r#"        /// <summary>
        /// Sets [{{columnNamePascal}}] from a list of identifiers.
        /// </summary>
        void Set{{columnNamePascal}}(IEnumerable<long> values);"#;

const SETTER_GUID_INTERFACE: &str = r#"        /// <summary>
        /// Sets [{{columnNamePascal}}] from a list of unique identifiers.
        /// </summary>
        void Set{{columnNamePascal}}(IEnumerable<System.Guid> values);"#;

const LIST_SETTER: &str = r#"        /// <inheritdoc />
        public void Set{{columnNamePascal}}(IEnumerable<long> values)
        {
            {{columnNamePascal}} = values == null ? null : string.Join(",", values);
        }"#;

const LIST_SETTER_GUID: &str = r#"        /// <inheritdoc />
        public void Set{{columnNamePascal}}(IEnumerable<System.Guid> values)
        {
            {{columnNamePascal}} = values == null ? null : string.Join(",", values);
        }"#;

const CONDITION_STRING: &str = r#"            if (!string.IsNullOrWhiteSpace({{columnNamePascal}}))
            {
                parameters.Add(new KeyValuePair<string, object>(Parameter.{{columnNamePascal}}, {{columnNamePascal}}));
            }"#;

const CONDITION_DATE_TIME: &str = r#"            if ({{columnNamePascal}}.HasValue && {{columnNamePascal}}.Value > SqlDateTime.MinValue.Value)
            {
                parameters.Add(new KeyValuePair<string, object>(Parameter.{{columnNamePascal}}, {{columnNamePascal}}.Value));
            }"#;

const CONDITION_OTHER: &str = r#"            if ({{columnNamePascal}} != null)
            {
                parameters.Add(new KeyValuePair<string, object>(Parameter.{{columnNamePascal}}, {{columnNamePascal}}));
            }"#;

const CONDITION_ENCRYPTED: &str = r#"            if (!string.IsNullOrWhiteSpace({{columnNamePascal}}))
            {
                parameters.Add(new KeyValuePair<string, object>(Parameter.{{columnNamePascal}}, CryptographyHelper.Encrypt({{columnNamePascal}})));
            }"#;

pub fn generate_filters(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    gen.tables()
        .map(|(name, table)| filter_file(gen, name, table))
        .collect()
}

fn is_date_time_type(dot_net: &str) -> bool {
    matches!(dot_net, "DateTime" | "DateTime?")
}

fn condition_for(dot_net: &str) -> &'static str {
    match dot_net {
        "string" => CONDITION_STRING,
        t if is_date_time_type(t) => CONDITION_DATE_TIME,
        _ => CONDITION_OTHER,
    }
}

#[derive(Default)]
struct FilterParts {
    usings: Vec<&'static str>,
    inherited: Vec<&'static str>,
    columns: Vec<String>,
    setters: Vec<String>,
    parameters: Vec<String>,
    short_columns: Vec<String>,
    list_setters: Vec<String>,
    conditions: Vec<String>,
}

impl FilterParts {
    fn add_using(&mut self, using: &'static str) {
        if !self.usings.contains(&using) {
            self.usings.push(using);
        }
    }

    fn inherit(&mut self, interface: &'static str) {
        if !self.inherited.contains(&interface) {
            self.inherited.push(interface);
        }
    }

    fn custom_parameter(&mut self, gen: &GenContext<'_>, parameter: &CustomParameter) {
        let r = Replacements::new()
            .with("columnName", parameter.name.as_str())
            .with("columnNamePascal", parameter.property_name.as_str())
            .with("columnType", parameter.property_type.as_str());
        self.columns.push(gen.render(COLUMN, &r));
        self.parameters.push(gen.render(PARAMETER, &r));
        self.short_columns.push(gen.render(SHORT_COLUMN, &r));
        self.conditions
            .push(gen.render(condition_for(&parameter.property_type), &r));
    }

    fn column(&mut self, gen: &GenContext<'_>, parent: &str, column: &Column, from_child: bool) {
        let mut in_interface = true;
        let mut dot_net = column.data_type_dot_net.clone();
        let setter_r = Replacements::new().with("columnNamePascal", column.name_pascal.as_str());

        match column.name.as_str() {
            "ID" | "Created_By" | "Created_Date" | "Modified_By" | "Modified_Date" => return,
            "Is_Default" => {
                self.inherit("IHasDefaultFilter");
                in_interface = false;
            }
            "Is_System" => {
                self.inherit("IHasSystemFilter");
                in_interface = false;
            }
            "UID" => {
                dot_net = "string".to_string();
                self.list_setters.push(gen.render(LIST_SETTER_GUID, &setter_r));
                self.setters.push(gen.render(SETTER_GUID_INTERFACE, &setter_r));
            }
            name if name.contains("_ID") => {
                if from_child && name == format!("{parent}_ID") {
                    return;
                }
                dot_net = "string".to_string();
                self.list_setters.push(gen.render(LIST_SETTER, &setter_r));
                self.setters.push(gen.render(SETTER_INTERFACE, &setter_r));
            }
            _ => {}
        }

        if is_date_time_type(&dot_net) {
            self.add_using("System");
            self.add_using("System.Data.SqlTypes");
        }

        let column_type = if dot_net != "string" && !column.is_nullable {
            format!("{dot_net}?")
        } else {
            dot_net.clone()
        };
        let r = Replacements::new()
            .with("columnName", column.name.as_str())
            .with("columnNamePascal", column.name_pascal.as_str())
            .with("columnType", column_type);

        if in_interface {
            self.columns.push(gen.render(COLUMN, &r));
        }
        self.parameters.push(gen.render(PARAMETER, &r));
        self.short_columns.push(gen.render(SHORT_COLUMN, &r));

        let condition = if column.is_encrypted {
            self.add_using("Jfw.Helpers");
            CONDITION_ENCRYPTED
        } else {
            condition_for(&dot_net)
        };
        self.conditions.push(gen.render(condition, &r));
    }
}

fn filter_file(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> GeneratedFile {
    let mut parts = FilterParts {
        inherited: vec!["IFilter"],
        ..FilterParts::default()
    };

    if let Some(custom) = gen.config.customization(name) {
        for parameter in &custom.custom_parameters {
            parts.custom_parameter(gen, parameter);
        }
    }
    for column in &table.columns {
        parts.column(gen, name, column, false);
    }
    for child in gen.config.children_of(name) {
        let Some(child_table) = gen.schema.table(child) else {
            tracing::warn!(table = name, child = %child, "Child table is not defined, skipping");
            continue;
        };
        for column in &child_table.columns {
            parts.column(gen, name, column, true);
        }
    }

    let mut usings: Vec<&str> = parts.usings.clone();
    usings.extend(DEFAULT_USINGS);

    let r = Replacements::new()
        .with("EntityName", name)
        .with("ColumnDefinitions", parts.columns.join("\n\n"))
        .with("SetterDefinitions", parts.setters.join("\n\n"))
        .with("ShortColumnDefinitions", parts.short_columns.join("\n"))
        .with("ParameterNameDefinitions", parts.parameters.join("\n"))
        .with("ConditionDefinitions", parts.conditions.join("\n\n"))
        .with("ListSetters", parts.list_setters.join("\n"))
        .with("Usings", using_block(&usings))
        .with("InheritedInterfaces", inheritance_clause(&parts.inherited));
    GeneratedFile::generated(
        models_path(&["Filters"], &format!("{name}Filter{GENERATED_SUFFIX}.cs")),
        gen.render(FILTER_TEMPLATE, &r),
    )
}
