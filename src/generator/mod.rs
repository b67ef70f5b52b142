//! # Generator Module
//!
//! Turns the table metadata in `tables.json` into the C# sources and SQL
//! scripts consumed by the Jfw framework.
//!
//! ## Overview
//!
//! Each part of the output has its own generator. A generator is a pure
//! function of the schema, the configuration and the render context; it
//! returns the files it would write and never touches the disk itself.
//! [`write_files`] persists them afterwards.
//!
//! ```text
//! tables.json → Schema::walk → generator → Vec<GeneratedFile> → write_files
//! ```
//!
//! ## Generated Structure
//!
//! ```text
//! output/
//! ├── Jfw.Core/EntityClasses/         # entity classes, model interfaces
//! ├── Jfw.DataAccess/                 # DAO interfaces and implementations
//! ├── Jfw.Models/                     # entities, filters, procedure constants
//! ├── Jfw.Repositories/               # repository interfaces and implementations
//! └── sp/                             # one SQL script per procedure kind
//! ```
//!
//! ## Ownership
//!
//! Files with the `.Generated` suffix (and the SQL scripts) are rewritten on
//! every run. Files meant to be edited by hand are [`Ownership::UserOwned`]
//! and are only written when missing unless `force` is set.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use jfw_codegen::generator::{generate_all, write_files, GenContext, GenerationScope, WriteOptions};
//! use jfw_codegen::template::RenderContext;
//!
//! let ctx = RenderContext::today(&config);
//! let gen = GenContext::new(&schema, &config, &ctx);
//! let files = generate_all(&gen, &GenerationScope::all())?;
//! write_files("output".as_ref(), &files, WriteOptions::default())?;
//! ```

mod constants;
mod data_access;
mod entities;
mod entity_classes;
mod filters;
mod models;
mod procedures;
mod repositories;
mod writer;


pub use constants::generate_constants;
pub use data_access::generate_data_access;
pub use entities::generate_entities;
pub use entity_classes::generate_entity_classes;
pub use filters::generate_filters;
pub use models::generate_models;
pub use procedures::generate_procedures;
pub use repositories::generate_repositories;
pub use writer::{write_files, WriteOptions, WriteReport};

use crate::config::GeneratorConfig;
use crate::schema::{Schema, TableMetadata};
use crate::template::{RenderContext, Replacements};
use anyhow::Context;
use std::path::PathBuf;

/// Suffix of files that are fully owned by the generator
pub const GENERATED_SUFFIX: &str = ".Generated";

pub(crate) const CORE_ROOT: &str = "Jfw.Core";
pub(crate) const DATA_ACCESS_ROOT: &str = "Jfw.DataAccess";
pub(crate) const MODELS_ROOT: &str = "Jfw.Models";
pub(crate) const REPOSITORIES_ROOT: &str = "Jfw.Repositories";
pub(crate) const SP_ROOT: &str = "sp";

/// Who owns a generated file once it exists on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Rewritten on every run
    Generated,
    /// Written once, then left to the developer
    UserOwned,
}

/// A file produced by a generator, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
    pub ownership: Ownership,
}

impl GeneratedFile {
    pub fn generated(path: PathBuf, contents: String) -> Self {
        Self {
            path,
            contents,
            ownership: Ownership::Generated,
        }
    }

    pub fn user_owned(path: PathBuf, contents: String) -> Self {
        Self {
            path,
            contents,
            ownership: Ownership::UserOwned,
        }
    }
}

/// Inputs shared by every generator
#[derive(Debug, Clone, Copy)]
pub struct GenContext<'a> {
    pub schema: &'a Schema,
    pub config: &'a GeneratorConfig,
    pub ctx: &'a RenderContext,
}

impl<'a> GenContext<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig, ctx: &'a RenderContext) -> Self {
        Self {
            schema,
            config,
            ctx,
        }
    }

    /// Tables allowed by the configured include/exclude lists
    pub fn tables(&self) -> impl Iterator<Item = (&'a str, &'a TableMetadata)> + 'a {
        self.schema.walk(self.config.table_filter())
    }

    pub fn render(&self, template: &str, replacements: &Replacements) -> String {
        self.ctx.render(template, replacements)
    }
}

/// Which parts of the output to generate
///
/// Each flag is further gated by the matching `[toggles]` entry of the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationScope {
    pub entities: bool,
    pub models: bool,
    pub entity_classes: bool,
    pub data_access: bool,
    pub repositories: bool,
    pub filters: bool,
    pub constants: bool,
    pub procedures: bool,
}

impl GenerationScope {
    pub fn all() -> Self {
        Self {
            entities: true,
            models: true,
            entity_classes: true,
            data_access: true,
            repositories: true,
            filters: true,
            constants: true,
            procedures: true,
        }
    }

    pub fn none() -> Self {
        Self {
            entities: false,
            models: false,
            entity_classes: false,
            data_access: false,
            repositories: false,
            filters: false,
            constants: false,
            procedures: false,
        }
    }

    /// Intersect with the `[toggles]` section of `config`
    pub fn with_toggles(&self, config: &GeneratorConfig) -> Self {
        let t = &config.toggles;
        Self {
            entities: self.entities && t.entity_models,
            models: self.models && t.core_models,
            entity_classes: self.entity_classes && t.entity_classes,
            data_access: self.data_access && t.data_access,
            repositories: self.repositories && t.repositories,
            filters: self.filters && t.filters,
            constants: self.constants && t.constants,
            procedures: self.procedures && t.procedures,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

type PartFn = fn(&GenContext<'_>) -> anyhow::Result<Vec<GeneratedFile>>;

/// Run every generator enabled by `scope` and the configuration toggles.
///
/// # Errors
///
/// Returns the first error raised by an enabled generator.
pub fn generate_all(
    gen: &GenContext<'_>,
    scope: &GenerationScope,
) -> anyhow::Result<Vec<GeneratedFile>> {
    let scope = scope.with_toggles(gen.config);
    let mut files = Vec::new();
    let parts: [(bool, &str, PartFn); 8] = [
        (scope.entities, "entities", |g| Ok(generate_entities(g))),
        (scope.models, "models", |g| Ok(generate_models(g))),
        (scope.entity_classes, "entity classes", |g| Ok(generate_entity_classes(g))),
        (scope.data_access, "data access", |g| Ok(generate_data_access(g))),
        (scope.repositories, "repositories", |g| Ok(generate_repositories(g))),
        (scope.filters, "filters", |g| Ok(generate_filters(g))),
        (scope.constants, "constants", generate_constants),
        (scope.procedures, "procedures", |g| Ok(generate_procedures(g))),
    ];
    for (enabled, label, generate) in parts {
        if !enabled {
            tracing::debug!(part = label, "Skipping disabled part");
            continue;
        }
        let generated = generate(gen).with_context(|| format!("Failed to generate {label}"))?;
        tracing::info!(part = label, files = generated.len(), "Generated");
        files.extend(generated);
    }
    Ok(files)
}

/// Audit columns maintained by the framework rather than the entity
pub fn is_audit_column(name: &str) -> bool {
    matches!(
        name,
        "Modified_By" | "Modified_Date" | "Created_By" | "Created_Date"
    )
}

fn rooted(root: &str, dirs: &[&str], file: &str) -> PathBuf {
    let mut path = PathBuf::from(root);
    for dir in dirs {
        if !dir.is_empty() {
            path.push(dir);
        }
    }
    path.push(file);
    path
}

pub(crate) fn models_path(dirs: &[&str], file: &str) -> PathBuf {
    rooted(MODELS_ROOT, dirs, file)
}

pub(crate) fn core_path(dirs: &[&str], file: &str) -> PathBuf {
    rooted(CORE_ROOT, dirs, file)
}

pub(crate) fn data_access_path(dirs: &[&str], file: &str) -> PathBuf {
    rooted(DATA_ACCESS_ROOT, dirs, file)
}

pub(crate) fn repositories_path(dirs: &[&str], file: &str) -> PathBuf {
    rooted(REPOSITORIES_ROOT, dirs, file)
}

pub(crate) fn sp_path(file: &str) -> PathBuf {
    rooted(SP_ROOT, &[], file)
}
