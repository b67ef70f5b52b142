use super::{parameter_default, sql_type};
use crate::generator::GenContext;
use crate::schema::TableMetadata;
use crate::template::Replacements;

const TEMPLATE: &str = include_str!("../../../templates/procedures/insert.sql.txt");

const PARAMETER: &str = "    @{{columnName}} {{dataType}}{{defaultValue}},";
const COLUMN: &str = "        [{{columnName}}],";
const VALUE: &str = "        @{{columnName}},";

/// Columns filled by the database or by the `@Created_By` parameter
const SKIPPED: [&str; 6] = [
    "ID",
    "UID",
    "Modified_By",
    "Modified_Date",
    "Created_By",
    "Created_Date",
];

pub(super) fn script(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> String {
    let mut parameters = Vec::new();
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for column in table
        .columns
        .iter()
        .filter(|c| !SKIPPED.contains(&c.name.as_str()))
    {
        let r = Replacements::new()
            .with("columnName", column.name.as_str())
            .with("dataType", sql_type(column))
            .with("defaultValue", parameter_default(column));
        parameters.push(gen.render(PARAMETER, &r));
        columns.push(gen.render(COLUMN, &r));
        values.push(gen.render(VALUE, &r));
    }

    let r = Replacements::new()
        .with("Parameters", parameters.join("\n"))
        .with("Columns", columns.join("\n"))
        .with("Values", values.join("\n"))
        .with("entityName", name);
    gen.render(TEMPLATE, &r)
}
