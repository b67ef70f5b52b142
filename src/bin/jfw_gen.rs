use clap::Parser;
use jfw_codegen::cli::{run_cli, Cli};
use jfw_codegen::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env(cli.verbose))?;
    run_cli(cli)
}
