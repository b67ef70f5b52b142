use super::list::PARAMETER;
use super::{push_unique, sql_type};
use crate::generator::{is_audit_column, GenContext};
use crate::schema::{Column, TableMetadata};
use crate::template::Replacements;

const TEMPLATE: &str = include_str!("../../../templates/procedures/view.sql.txt");

const FILTER_CRITERIA: &str = "    SET @whereClause = CONCAT(@whereClause, [{{tableSchema}}].[fn_GetFilterCriteriaWithTableAlias]('{{columnName}}', @{{columnName}}, '{{entityAlias}}'), @newLine)";
const FILTER_CRITERIA_DATE_RANGE: &str = "    SET @whereClause = CONCAT(@whereClause, [{{tableSchema}}].[fn_GetFilterCriteriaByDateRangeWithTableAlias]('{{columnName}}', @{{columnName}}_From, @{{columnName}}_To, '{{entityAlias}}'), @newLine)";
const FILTER_CRITERIA_LIST: &str = "    SET @whereClause = CONCAT(@whereClause, [{{tableSchema}}].[fn_GetFilterCriteriaByListWithTableAlias]('{{columnName}}', @{{columnName}}, '{{entityAlias}}'), @newLine)";

const KEYWORD_FILTER_CRITERIA: &str = r#"        DECLARE @{{childEntityName}}FilterQuery NVARCHAR(max) = [{{tableSchema}}].[fn_GetTableViewSearchQuery]('{{tableSchema}}', '{{childEntityName}}', @Keywords)
        SET @tmpSqlString = CONCAT('INSERT INTO #temp(tmpId) SELECT [{{entityName}}_ID] FROM (', @{{childEntityName}}FilterQuery, ') as X WHERE [{{entityName}}_ID] NOT IN (SELECT tmpId FROM #temp)')
        -- PRINT CONCAT('SQL string: ', @tmpSqlString)
        EXEC sp_executesql @tmpSqlString
"#;
const CHILD_SELECT_CLAUSE: &str = "    SET @selectClause = CONCAT(@selectClause, [{{tableSchema}}].[fn_GenerateColumnAliases]('{{childEntityName}}', '{{childEntityName}}_', '{{childEntityAlias}}'), ', ')";
const CHILD_FROM_CLAUSE: &str = "    SET @fromClause = CONCAT(@fromClause, 'LEFT JOIN [{{tableSchema}}].[{{childEntityName}}] AS {{childEntityAlias}} ON {{entityAlias}}.[ID] = {{childEntityAlias}}.[{{entityName}}_ID]', @newLine)";

#[derive(Default)]
struct ViewParts {
    parameters: Vec<String>,
    criteria: Vec<String>,
}

impl ViewParts {
    fn add_parameter(&mut self, gen: &GenContext<'_>, column_name: &str, data_type: &str) {
        let r = Replacements::new()
            .with("columnName", column_name)
            .with("dataType", data_type);
        push_unique(&mut self.parameters, gen.render(PARAMETER, &r));
    }

    fn column(&mut self, gen: &GenContext<'_>, column: &Column, alias: &str, parent: Option<&str>) {
        if is_audit_column(&column.name) {
            return;
        }
        let template = if column.is_identifier() || column.name == "UID" {
            if let Some(parent) = parent {
                let parent_key = format!("{parent}_ID");
                if column.name == parent_key || column.name == "ID" || column.name == "UID" {
                    return;
                }
            }
            self.add_parameter(gen, &column.name, "VARCHAR(MAX)");
            FILTER_CRITERIA_LIST
        } else if column.is_date_time() {
            let data_type = sql_type(column);
            self.add_parameter(gen, &format!("{}_From", column.name), &data_type);
            self.add_parameter(gen, &format!("{}_To", column.name), &data_type);
            FILTER_CRITERIA_DATE_RANGE
        } else {
            self.add_parameter(gen, &column.name, &sql_type(column));
            FILTER_CRITERIA
        };
        let r = Replacements::new()
            .with("columnName", column.name.as_str())
            .with("entityAlias", alias);
        self.criteria.push(gen.render(template, &r));
    }
}

/// View procedure of a view table, `None` for every other table
pub(super) fn script(gen: &GenContext<'_>, name: &str, table: &TableMetadata) -> Option<String> {
    if !gen.config.has_view(name) {
        return None;
    }
    let Some(custom) = gen.config.customization(name) else {
        tracing::warn!(table = name, "View table has no procedure customisation, skipping");
        return None;
    };
    let alias_of = |table: &str| -> String {
        custom.alias.get(table).cloned().unwrap_or_else(|| {
            tracing::warn!(table, "No alias configured, using the table name");
            table.to_string()
        })
    };
    let entity_alias = alias_of(name);

    let mut parts = ViewParts::default();
    for parameter in &custom.custom_parameters {
        parts.add_parameter(gen, &parameter.name, &parameter.sql_type);
        parts
            .criteria
            .push(gen.render(&parameter.filter_criteria, &Replacements::new()));
    }
    for column in &table.columns {
        parts.column(gen, column, &entity_alias, None);
    }

    let mut keyword_criteria = Vec::new();
    let mut child_selects = Vec::new();
    let mut child_froms = Vec::new();
    for child in &custom.child_tables {
        let child_alias = alias_of(child);
        let r = Replacements::new()
            .with("childEntityName", child.as_str())
            .with("childEntityAlias", child_alias.as_str())
            .with("entityName", name)
            .with("entityAlias", entity_alias.as_str());
        child_froms.push(gen.render(CHILD_FROM_CLAUSE, &r));
        child_selects.push(gen.render(CHILD_SELECT_CLAUSE, &r));
        keyword_criteria.push(gen.render(KEYWORD_FILTER_CRITERIA, &r));

        match gen.schema.table(child) {
            Some(child_table) => {
                for column in &child_table.columns {
                    parts.column(gen, column, &child_alias, Some(name));
                }
            }
            None => tracing::warn!(table = name, child = %child, "Child table is not defined"),
        }
    }

    let r = Replacements::new()
        .with("PreExecutionStatements", custom.precondition.as_deref().unwrap_or(""))
        .with("Parameters", parts.parameters.join("\n"))
        .with("FilterCriterias", parts.criteria.join("\n"))
        .with("KeywordFilterCriterias", keyword_criteria.join("\n"))
        .with("ChildEntitySelectClause", child_selects.join("\n"))
        .with("ChildEntityFromClause", child_froms.join("\n"))
        .with("entityName", name)
        .with("entityAlias", entity_alias.as_str());
    Some(gen.render(TEMPLATE, &r))
}
