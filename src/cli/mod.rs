//! # CLI Module
//!
//! Command-line interface of the `jfw-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the C# sources and SQL scripts from `tables.json`:
//!
//! ```bash
//! jfw-gen generate --output output
//! ```
//!
//! Options:
//! - `--tables <FILE>` - Table metadata (default: `paths.tables`)
//! - `--output <DIR>` - Output directory (default: `paths.output`)
//! - `--only <PARTS>` - Comma separated parts, e.g. `entities,procedures`
//! - `--force` - Overwrite existing user-owned files
//! - `--dry-run` - Report what would be written
//! - `--date <YYYY-MM-DD>` - Date used in file headers
//!
//! ### `import`
//!
//! Build `tables.json` from the raw column and procedure parameter exports.
//!
//! ### `check`
//!
//! Report inconsistencies between tables, procedures and configuration:
//!
//! ```bash
//! jfw-gen check --fail-on-error
//! ```
//!
//! ### `clean`, `merge`, `copy`, `fill-headers`
//!
//! Housekeeping around a run: empty the output folder, merge the SQL scripts
//! into one file, copy the output into the framework checkout and add the
//! standard header to framework sources without one.
//!
//! ### `init`
//!
//! Write a sample `jfw-codegen.toml`.
//!
//! ## Typical Run
//!
//! ```bash
//! jfw-gen import
//! jfw-gen check
//! jfw-gen clean
//! jfw-gen generate --date 2024-03-09
//! jfw-gen merge
//! jfw-gen copy --dry-run
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands, OnlyPart};
