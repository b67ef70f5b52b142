//! Stored procedure name constants and their XML documentation.
//!
//! `StoredProcedureConstants.Generated.cs` holds one constant per procedure.
//! Each constant pulls its doc comment from `StoredProcedures.xml`, which
//! lists the procedure parameters (required ones marked with `*`).

use super::{models_path, GenContext, GeneratedFile, GENERATED_SUFFIX};
use crate::schema::Procedure;
use crate::template::Replacements;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use anyhow::Context;
use quick_xml::Writer;
use std::io::Write;

const CONSTANTS_TEMPLATE: &str =
    include_str!("../../templates/constants/stored_procedure_constants.cs.txt");

const PROCEDURE_DEFINITION: &str = r#"        /// <include file='StoredProcedures.xml' path='root/procedure[@key="{{key}}"]/*' />
        public const string {{key}} = "{{name}}";"#;

const SUMMARY: &str = "This maps to the stored procedure with the same name of the value.";

/// Constants class plus `StoredProcedures.xml`
///
/// # Errors
///
/// Returns an error if the XML documentation cannot be written.
pub fn generate_constants(gen: &GenContext<'_>) -> anyhow::Result<Vec<GeneratedFile>> {
    let mut definitions = Vec::new();
    let mut procedures: Vec<&Procedure> = Vec::new();
    for (name, table) in gen.tables() {
        if table.procedures.is_empty() {
            tracing::info!(table = name, "No stored procedures found");
            continue;
        }
        for procedure in table.procedures.values() {
            let r = Replacements::new()
                .with("key", procedure.key.as_str())
                .with("name", procedure.name_with_schema.as_str());
            definitions.push(gen.render(PROCEDURE_DEFINITION, &r));
            procedures.push(procedure);
        }
    }

    let r = Replacements::new().with("ProcedureDefinitions", definitions.join("\n\n"));
    let xml = procedures_xml(&procedures).context("Failed to build StoredProcedures.xml")?;
    Ok(vec![
        GeneratedFile::generated(
            models_path(&[], &format!("StoredProcedureConstants{GENERATED_SUFFIX}.cs")),
            gen.render(CONSTANTS_TEMPLATE, &r),
        ),
        GeneratedFile::generated(models_path(&[], "StoredProcedures.xml"), xml),
    ])
}

/// Pretty printed `<root>` document with one `<procedure>` per entry.
pub fn procedures_xml(procedures: &[&Procedure]) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("root")))?;

    for procedure in procedures {
        writer.write_event(Event::Start(
            BytesStart::new("procedure").with_attributes([("key", procedure.key.as_str())]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("summary")))?;
        writer.write_event(Event::Text(BytesText::new(SUMMARY)))?;
        writer.write_event(Event::Start(
            BytesStart::new("list").with_attributes([("type", "number")]),
        ))?;
        for parameter in &procedure.parameters {
            let term = if parameter.is_required {
                format!("{}*", parameter.name)
            } else {
                parameter.name.clone()
            };
            writer.write_event(Event::Start(BytesStart::new("item")))?;
            write_text_element(&mut writer, "term", &term)?;
            write_text_element(&mut writer, "description", &parameter.data_type_sql_with_length)?;
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("list")))?;
        writer.write_event(Event::End(BytesEnd::new("summary")))?;
        writer.write_event(Event::End(BytesEnd::new("procedure")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("root")))?;
    let mut bytes = writer.into_inner();
    bytes.write_all(b"\n")?;
    Ok(String::from_utf8(bytes)?)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
