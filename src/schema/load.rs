use super::types::Schema;
use anyhow::Context;
use std::path::Path;

/// Read `tables.json` into a [`Schema`].
pub fn load_tables(path: &Path) -> anyhow::Result<Schema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read table metadata: {}", path.display()))?;
    let schema: Schema = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse table metadata: {}", path.display()))?;
    tracing::debug!(path = %path.display(), tables = schema.len(), "Loaded table metadata");
    Ok(schema)
}

/// Write a [`Schema`] as pretty JSON with every object's keys sorted.
pub fn save_tables(path: &Path, schema: &Schema) -> anyhow::Result<()> {
    // Round-tripping through `Value` sorts struct fields as well as map keys.
    let value = serde_json::to_value(schema)?;
    let text = serde_json::to_string_pretty(&value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write table metadata: {}", path.display()))?;
    Ok(())
}

/// Read a JSON array of raw query records.
pub(crate) fn load_records<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records: {}", path.display()))
}
