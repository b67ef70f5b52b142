//! Repository interfaces and implementations under `Jfw.Repositories`.

use super::{repositories_path, GenContext, GeneratedFile, GENERATED_SUFFIX};
use crate::template::Replacements;

const INTERFACE_TEMPLATE: &str = include_str!("../../templates/repositories/interface.cs.txt");
const IMPLEMENT_GENERATED_TEMPLATE: &str =
    include_str!("../../templates/repositories/implement_generated.cs.txt");
const IMPLEMENT_TEMPLATE: &str = include_str!("../../templates/repositories/implement.cs.txt");

pub fn generate_repositories(gen: &GenContext<'_>) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for (name, _) in gen.tables() {
        let r = Replacements::new().with("entityName", name);
        files.push(GeneratedFile::generated(
            repositories_path(&["Interfaces"], &format!("I{name}Repository.cs")),
            gen.render(INTERFACE_TEMPLATE, &r),
        ));
        files.push(GeneratedFile::generated(
            repositories_path(&["Implements"], &format!("{name}Repository{GENERATED_SUFFIX}.cs")),
            gen.render(IMPLEMENT_GENERATED_TEMPLATE, &r),
        ));
        files.push(GeneratedFile::user_owned(
            repositories_path(&["Implements"], &format!("{name}Repository.cs")),
            gen.render(IMPLEMENT_TEMPLATE, &r),
        ));
    }
    files
}
