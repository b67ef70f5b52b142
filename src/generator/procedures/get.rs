use crate::generator::GenContext;
use crate::template::Replacements;

const TEMPLATE: &str = include_str!("../../../templates/procedures/get.sql.txt");

pub(super) fn script(gen: &GenContext<'_>, name: &str) -> String {
    gen.render(TEMPLATE, &Replacements::new().with("entityName", name))
}
