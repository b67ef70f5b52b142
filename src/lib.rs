//! # jfw-codegen
//!
//! **jfw-codegen** generates the C# data layer and SQL stored procedures of the
//! Jfw framework from database table metadata.
//!
//! ## Overview
//!
//! Column and procedure parameter metadata is exported from SQL Server as JSON
//! records, imported into `tables.json`, and then rendered through literal
//! `{{placeholder}}` templates into:
//!
//! - entity interfaces and partial classes
//! - core entity classes and model interfaces
//! - DAOs and repositories
//! - list filters and stored procedure constants
//! - Insert, Update, Delete, Get, List and View procedure scripts
//!
//! ## Architecture
//!
//! - **[`config`]** - `jfw-codegen.toml` loading, local overrides and environment variables
//! - **[`schema`]** - Table metadata model, `tables.json` I/O and raw record import
//! - **[`template`]** - Placeholder substitution and the shared render context
//! - **[`generator`]** - One generator per output part plus the file writer
//! - **[`checker`]** - Consistency checks over tables, procedures and configuration
//! - **[`tasks`]** - Cleaning, merging, copying to the framework and file headers
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `jfw-gen` command line
//!
//! ### Generation Flow
//!
//! ```text
//! table-column-info.json + procedure-parameter-info.json
//!     └─ schema::import_schema ─> tables.json
//!
//! tables.json ─> schema::load_tables ─> generator::generate_all ─> generator::write_files ─> output/
//!
//! output/ ─> tasks::merge_procedures ─> tasks::copy_to_framework ─> framework/
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! jfw-gen init
//! jfw-gen import
//! jfw-gen generate
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod generator;
pub mod logging;
pub mod schema;
pub mod tasks;
pub mod template;

pub use config::{load_config, GeneratorConfig};
pub use schema::{load_tables, Schema};
