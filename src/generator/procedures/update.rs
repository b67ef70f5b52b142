use super::{parameter_default, sql_type};
use crate::generator::GenContext;
use crate::schema::TableMetadata;
use crate::template::Replacements;

const TEMPLATE: &str = include_str!("../../../templates/procedures/update.sql.txt");

const PARAMETER: &str = "    @{{columnName}} {{dataType}}{{defaultValue}},";
const SET_COMMAND: &str = "        [{{columnName}}] = @{{columnName}},";

const SKIPPED: [&str; 6] = [
    "ID",
    "UID",
    "Modified_By",
    "Modified_Date",
    "Created_By",
    "Created_Date",
];

pub(super) fn script(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> String {
    let (parameters, set_commands): (Vec<String>, Vec<String>) = table
        .columns
        .iter()
        .filter(|c| !SKIPPED.contains(&c.name.as_str()))
        .map(|column| {
            let r = Replacements::new()
                .with("columnName", column.name.as_str())
                .with("dataType", sql_type(column))
                .with("defaultValue", parameter_default(column));
            (gen.render(PARAMETER, &r), gen.render(SET_COMMAND, &r))
        })
        .unzip();

    let r = Replacements::new()
        .with("Parameters", parameters.join("\n"))
        .with("SetCommands", set_commands.join("\n"))
        .with("entityName", name);
    gen.render(TEMPLATE, &r)
}
