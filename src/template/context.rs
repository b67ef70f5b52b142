use super::{render, unresolved_placeholders, Replacements};
use crate::config::GeneratorConfig;
use chrono::NaiveDate;

/// Placeholders shared by every template: schema, author and date
#[derive(Debug, Clone)]
pub struct RenderContext {
    common: Replacements,
    date: NaiveDate,
}

impl RenderContext {
    pub fn new(config: &GeneratorConfig, date: NaiveDate) -> Self {
        let common = Replacements::new()
            .with("tableSchema", config.table_schema.as_str())
            .with("authorFullName", config.author.full_name.as_str())
            .with("authorDevCode", config.author.dev_code.as_str())
            .with("currentDate", date.format("%Y-%m-%d").to_string());
        Self { common, date }
    }

    /// Context dated today (UTC)
    pub fn today(config: &GeneratorConfig) -> Self {
        Self::new(config, chrono::Utc::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn common(&self) -> &Replacements {
        &self.common
    }

    /// Render `template` with `replacements`, then the common placeholders.
    pub fn render(&self, template: &str, replacements: &Replacements) -> String {
        let mut all = replacements.clone();
        for (key, value) in self.common.iter() {
            if all.get(key).is_none() {
                all.set(key, value);
            }
        }
        let rendered = render(template, &all);
        let leftover = unresolved_placeholders(&rendered);
        if !leftover.is_empty() {
            tracing::debug!(placeholders = ?leftover, "Unresolved template placeholders");
        }
        rendered
    }
}
