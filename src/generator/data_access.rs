//! DAO interfaces and implementations under `Jfw.DataAccess`.

use super::{data_access_path, GenContext, GeneratedFile, GENERATED_SUFFIX};
use crate::schema::{ProcedureKind, TableMetadata};
use crate::template::Replacements;

const INTERFACE_TEMPLATE: &str = include_str!("../../templates/data_access/interface.cs.txt");
const IMPLEMENT_GENERATED_TEMPLATE: &str =
    include_str!("../../templates/data_access/implement_generated.cs.txt");
const IMPLEMENT_TEMPLATE: &str = include_str!("../../templates/data_access/implement.cs.txt");

const PROCEDURE_OVERRIDE: &str =
    "        protected override string {{kind}}ProcedureName => StoredProcedureConstants.{{key}};";

pub fn generate_data_access(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for (name, table) in gen.tables() {
        let r = Replacements::new()
            .with("ProcedureOverrides", procedure_overrides(gen, table))
            .with("entityName", name);
        files.push(GeneratedFile::generated(
            data_access_path(&["Interfaces"], &format!("I{name}Dao.cs")),
            gen.render(INTERFACE_TEMPLATE, &r),
        ));
        files.push(GeneratedFile::generated(
            data_access_path(&["Implements"], &format!("{name}Dao{GENERATED_SUFFIX}.cs")),
            gen.render(IMPLEMENT_GENERATED_TEMPLATE, &r),
        ));
        files.push(GeneratedFile::user_owned(
            data_access_path(&["Implements"], &format!("{name}Dao.cs")),
            gen.render(IMPLEMENT_TEMPLATE, &r),
        ));
    }
    files
}

/// One procedure name override per stored procedure the table has
fn procedure_overrides(gen: &GenContext<'_>, table: &TableMetadata) -> String {
    ProcedureKind::ALL
        .iter()
        .filter_map(|kind| table.procedure(*kind).map(|p| (kind, p)))
        .map(|(kind, procedure)| {
            let r = Replacements::new()
                .with("kind", kind.key())
                .with("key", procedure.key.as_str());
            gen.render(PROCEDURE_OVERRIDE, &r)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
