//! # Template Module
//!
//! Literal `{{key}}` substitution used for every generated file.
//!
//! There is no escaping, nesting or control flow. Keys are replaced in the
//! order they were added, so a value may introduce placeholders that a later
//! key resolves. Tabs are normalized to four spaces after substitution unless
//! [`render_raw`] is used.
//!
//! ```rust
//! use jfw_codegen::template::{render, Replacements};
//!
//! let out = render("class {{Name}}\t{}", &Replacements::new().with("Name", "User"));
//! assert_eq!(out, "class User    {}");
//! ```

mod context;

#[cfg(test)]
mod tests;

pub use context::RenderContext;

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered placeholder values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements(Vec<(String, String)>);

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Replacements::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key`, keeping its original position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append every entry of `other` after the existing ones
    pub fn extend(&mut self, other: &Replacements) {
        for (k, v) in &other.0 {
            self.set(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Replacements::new();
        for (k, v) in iter {
            replacements.set(k, v);
        }
        replacements
    }
}

/// Replace every `{{key}}` and convert tabs to four spaces.
pub fn render(template: &str, replacements: &Replacements) -> String {
    render_raw(template, replacements).replace('\t', "    ")
}

/// Replace every `{{key}}`, leaving tabs untouched.
pub fn render_raw(template: &str, replacements: &Replacements) -> String {
    let mut result = template.to_string();
    for (key, value) in replacements.iter() {
        let token = format!("{{{{{key}}}}}");
        if result.contains(&token) {
            result = result.replace(&token, value);
        }
    }
    result
}

/// `using` lines for a C# file, followed by a blank line.
pub fn using_block<S: AsRef<str>>(usings: &[S]) -> String {
    if usings.is_empty() {
        return String::new();
    }
    let mut result: String = usings
        .iter()
        .map(|u| format!("using {};\n", u.as_ref()))
        .collect();
    result.push('\n');
    result
}

/// ` : A, B` inheritance clause, or nothing for an empty list.
pub fn inheritance_clause<S: AsRef<str>>(types: &[S]) -> String {
    if types.is_empty() {
        return String::new();
    }
    let joined: Vec<&str> = types.iter().map(|t| t.as_ref()).collect();
    format!(" : {}", joined.join(", "))
}

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z][A-Za-z0-9_]*)\}\}").expect("placeholder regex should be valid")
});

/// Placeholder names still present in rendered text, in order of first appearance
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for cap in PLACEHOLDER_REGEX.captures_iter(text) {
        let name = cap[1].to_string();
        if !found.contains(&name) {
            found.push(name);
        }
    }
    found
}
