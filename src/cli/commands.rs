use crate::checker::{self, CheckSeverity};
use crate::config::{self, GeneratorConfig};
use crate::generator::{self, GenContext, GenerationScope, WriteOptions};
use crate::schema;
use crate::tasks;
use crate::template::RenderContext;
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Command-line interface of the Jfw code generator
///
/// Reads `tables.json` and writes the C# sources and SQL scripts of the Jfw
/// framework.
#[derive(Parser)]
#[command(name = "jfw-gen", version)]
#[command(about = "Jfw framework code generator", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./jfw-codegen.toml when present)
    #[arg(short, long, global = true, env = "JFW_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG or JFW_GEN_LOG_LEVEL is set
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate C# sources and SQL scripts from tables.json
    Generate {
        /// Table metadata file (default: paths.tables)
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// Output directory (default: paths.output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Limit generation to specific parts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// Overwrite existing user-owned files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Show what would be written without touching the disk
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Date written into file headers, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Build tables.json from the raw column and procedure parameter exports
    Import {
        /// Column records (default: paths.column_info)
        #[arg(long)]
        column_info: Option<PathBuf>,

        /// Procedure parameter records (default: paths.procedure_info)
        #[arg(long)]
        procedure_info: Option<PathBuf>,

        /// Where to write tables.json (default: paths.tables)
        #[arg(short, long)]
        tables: Option<PathBuf>,
    },
    /// Check tables.json and the configuration for inconsistencies
    ///
    /// Reports audit and flag columns, tables without procedures, procedure
    /// parameter counts and types, unknown child tables and view tables
    /// without aliases.
    Check {
        /// Table metadata file (default: paths.tables)
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Delete and recreate the output directory
    Clean {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge sp/*.sql into sp/merged-stored-procedures.sql
    Merge {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy the output directory into the framework checkout
    Copy {
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Framework folder (default: paths.framework)
        #[arg(long)]
        framework: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Add the standard header to framework .cs files that have none
    FillHeaders {
        /// Framework folder (default: paths.framework)
        #[arg(long)]
        framework: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Write a sample jfw-codegen.toml if it does not exist
    Init {
        /// Target file (default: --config or ./jfw-codegen.toml)
        path: Option<PathBuf>,
    },
}

/// Parts of the output that can be generated on their own
///
/// Used with the `--only` flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// Entity interfaces and partial classes (Jfw.Models/Entities)
    Entities,
    /// Model interfaces (Jfw.Core/EntityClasses/Interfaces)
    Models,
    /// Core entity classes (Jfw.Core/EntityClasses)
    EntityClasses,
    /// DAO interfaces and classes (Jfw.DataAccess)
    DataAccess,
    /// Repository interfaces and classes (Jfw.Repositories)
    Repositories,
    /// List filters (Jfw.Models/Filters)
    Filters,
    /// Stored procedure constants (Jfw.Models/Constants)
    Constants,
    /// SQL scripts (sp/)
    Procedures,
}

/// Execute a parsed command line
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, an input file
/// cannot be read or parsed, or an output file cannot be written.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Generate {
            tables,
            output,
            only,
            force,
            dry_run,
            date,
        } => {
            let config = config::load_config(config_path)?;
            let schema = load_schema(&config, tables.as_deref())?;
            let ctx = match date {
                Some(date) => RenderContext::new(&config, date),
                None => RenderContext::today(&config),
            };
            let scope = map_only_to_scope(only.as_deref());
            let gen = GenContext::new(&schema, &config, &ctx);
            let files = generator::generate_all(&gen, &scope)?;

            let output = output.unwrap_or_else(|| config.paths.output.clone());
            let report = generator::write_files(&output, &files, WriteOptions { force, dry_run })?;
            println!(
                "\n✨ {} file(s) written, {} skipped in {:?}",
                report.written.len(),
                report.skipped.len(),
                output
            );
            Ok(())
        }
        Commands::Import {
            column_info,
            procedure_info,
            tables,
        } => {
            let config = config::load_config(config_path)?;
            let column_info = column_info.unwrap_or_else(|| config.paths.column_info.clone());
            let procedure_info =
                procedure_info.unwrap_or_else(|| config.paths.procedure_info.clone());
            let tables = tables.unwrap_or_else(|| config.paths.tables.clone());

            let imported = schema::import_schema(&config, &column_info, &procedure_info)?;
            schema::save_tables(&tables, &imported)?;
            println!("✅ Imported {} table(s) into {:?}", imported.len(), tables);
            Ok(())
        }
        Commands::Check {
            tables,
            fail_on_error,
            errors_only,
        } => {
            let config = config::load_config(config_path)?;
            let schema = load_schema(&config, tables.as_deref())?;
            let issues = checker::check_schema(&schema, &config);

            if errors_only {
                let errors: Vec<_> = issues
                    .iter()
                    .filter(|i| i.severity == CheckSeverity::Error)
                    .cloned()
                    .collect();
                checker::print_check_issues(&errors);
                if fail_on_error {
                    checker::fail_if_errors(&errors);
                }
            } else {
                checker::print_check_issues(&issues);
                if fail_on_error {
                    checker::fail_if_errors(&issues);
                }
            }
            Ok(())
        }
        Commands::Clean { output } => {
            let config = config::load_config(config_path)?;
            tasks::clean_output(&output.unwrap_or(config.paths.output))
        }
        Commands::Merge { output } => {
            let config = config::load_config(config_path)?;
            tasks::merge_procedures(&output.unwrap_or(config.paths.output))?;
            Ok(())
        }
        Commands::Copy {
            output,
            framework,
            dry_run,
        } => {
            let config = config::load_config(config_path)?;
            let output = output.unwrap_or_else(|| config.paths.output.clone());
            let framework = framework.unwrap_or_else(|| config.paths.framework.clone());
            let copied = tasks::copy_to_framework(&output, &framework, dry_run)?;
            println!("✅ {} file(s) copied to {:?}", copied.len(), framework);
            Ok(())
        }
        Commands::FillHeaders { framework, dry_run } => {
            let config = config::load_config(config_path)?;
            let framework = framework.unwrap_or_else(|| config.paths.framework.clone());
            let ctx = RenderContext::today(&config);
            let updated = tasks::fill_missing_headers(&framework, &ctx, dry_run)?;
            println!("✅ {} file header(s) added", updated.len());
            Ok(())
        }
        Commands::Init { path } => {
            let target = path
                .or_else(|| config_path.map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE_NAME));
            if config::write_config_if_missing(&target)? {
                println!("✅ Wrote sample configuration to {target:?}");
            } else {
                println!("⚠️  Skipping existing file: {target:?}");
            }
            Ok(())
        }
    }
}

fn load_schema(config: &GeneratorConfig, tables: Option<&Path>) -> anyhow::Result<schema::Schema> {
    let path = tables.unwrap_or(&config.paths.tables);
    schema::load_tables(path)
        .with_context(|| "Run `jfw-gen import` to build tables.json from the raw exports")
}

/// Convert CLI `--only` parts to a [`GenerationScope`]
///
/// If `only` is `None`, all parts are enabled. If `only` is provided,
/// only the specified parts are enabled.
pub(crate) fn map_only_to_scope(only: Option<&[OnlyPart]>) -> GenerationScope {
    let Some(parts) = only else {
        return GenerationScope::all();
    };
    let mut scope = GenerationScope::none();
    for p in parts {
        match p {
            OnlyPart::Entities => scope.entities = true,
            OnlyPart::Models => scope.models = true,
            OnlyPart::EntityClasses => scope.entity_classes = true,
            OnlyPart::DataAccess => scope.data_access = true,
            OnlyPart::Repositories => scope.repositories = true,
            OnlyPart::Filters => scope.filters = true,
            OnlyPart::Constants => scope.constants = true,
            OnlyPart::Procedures => scope.procedures = true,
        }
    }
    scope
}
