use super::{push_unique, sql_type};
use crate::generator::{is_audit_column, GenContext};
use crate::schema::TableMetadata;
use crate::template::Replacements;

const TEMPLATE: &str = include_str!("../../../templates/procedures/list.sql.txt");

pub(super) const PARAMETER: &str = "    @{{columnName}} {{dataType}} = NULL,";
const FILTER_CRITERIA: &str = "    SET @whereClause = CONCAT(@whereClause, [{{tableSchema}}].[fn_GetFilterCriteria]('{{columnName}}', @{{columnName}}), @newLine)";
const FILTER_CRITERIA_DATE_RANGE: &str = "    SET @whereClause = CONCAT(@whereClause, [{{tableSchema}}].[fn_GetFilterCriteriaByDateRange]('{{columnName}}', @{{columnName}}_From, @{{columnName}}_To), @newLine)";
const FILTER_CRITERIA_LIST: &str = "    SET @whereClause = CONCAT(@whereClause, [{{tableSchema}}].[fn_GetFilterCriteriaByList]('{{columnName}}', @{{columnName}}), @newLine)";

pub(super) fn script(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> String {
    let mut parameters: Vec<String> = Vec::new();
    let mut criteria: Vec<String> = Vec::new();

    let mut add_parameter = |column_name: &str, data_type: &str| {
        let r = Replacements::new()
            .with("columnName", column_name)
            .with("dataType", data_type);
        push_unique(&mut parameters, gen.render(PARAMETER, &r));
    };

    let custom_parameters = gen
        .config
        .customization(name)
        .map(|c| c.custom_parameters.as_slice())
        .unwrap_or(&[]);
    for parameter in custom_parameters {
        add_parameter(&parameter.name, &parameter.sql_type);
        criteria.push(gen.render(&parameter.filter_criteria, &Replacements::new()));
    }

    for column in table.columns.iter().filter(|c| !is_audit_column(&c.name)) {
        let template = if column.is_identifier() {
            add_parameter(&column.name, "VARCHAR(MAX)");
            FILTER_CRITERIA_LIST
        } else if column.is_date_time() {
            let data_type = sql_type(column);
            add_parameter(&format!("{}_From", column.name), &data_type);
            add_parameter(&format!("{}_To", column.name), &data_type);
            FILTER_CRITERIA_DATE_RANGE
        } else {
            add_parameter(&column.name, &sql_type(column));
            FILTER_CRITERIA
        };
        let r = Replacements::new().with("columnName", column.name.as_str());
        criteria.push(gen.render(template, &r));
    }

    let r = Replacements::new()
        .with("Parameters", parameters.join("\n"))
        .with("FilterCriterias", criteria.join("\n"))
        .with("entityName", name);
    gen.render(TEMPLATE, &r)
}
