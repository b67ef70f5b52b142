use crate::generator::GenContext;
use crate::template::Replacements;

const TEMPLATE: &str = include_str!("../../../templates/procedures/delete.sql.txt");

const HARD_DELETE: &str = r#"
    SET NOCOUNT ON;

    DELETE FROM
        [{{tableSchema}}].[{{entityName}}]
    WHERE
        [ID] = @ID
"#;

const SOFT_DELETE: &str = r#"
    SET NOCOUNT ON;

    DECLARE @Deleted smallint = -3;

    UPDATE
        [{{tableSchema}}].[{{entityName}}]
    SET
        [Status] = @Deleted
    WHERE
        [ID] = @ID
"#;

// child rows go away with their parent
const COMMENTED_DELETE: &str = r#"
    SET NOCOUNT ON;

    -- DELETE FROM
    --     [{{tableSchema}}].[{{entityName}}]
    -- WHERE
    --     [ID] = @ID
"#;

pub(super) fn script(gen: &GenContext<'_>, name: &str) -> String {
    let statement = if gen.config.is_soft_delete(name) {
        SOFT_DELETE
    } else if gen.config.is_child_table(name) {
        COMMENTED_DELETE
    } else {
        HARD_DELETE
    };
    let r = Replacements::new()
        .with("DeleteStatement", statement)
        .with("entityName", name);
    gen.render(TEMPLATE, &r)
}
