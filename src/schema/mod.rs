//! Table metadata model
//!
//! `tables.json` maps each table name to its columns and stored procedures.
//! [`load_tables`] reads it, [`import_schema`] builds it from the raw column
//! and parameter records exported from SQL Server.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
