//! dtoforge CLI tool

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dtoforge::observability::{self, ObservabilityConfig};
use dtoforge::DtoForgeConfig;
use dtoforge_cli_lib::commands::{GenerateCommand, InitCommand, TreeCommand};
use dtoforge_cli_lib::LogFormatArg;

#[derive(Parser)]
#[command(name = "dtoforge")]
#[command(version)]
#[command(about = "Generate DTO class sources from layered definition tables", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact, global = true)]
    log_format: LogFormatArg,

    /// Configuration file (defaults to ./dtoforge.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one source file per class in a definition table
    Generate(GenerateCommand),
    /// Print the class tree of a definition table
    Tree(TreeCommand),
    /// Write a starter configuration file
    Init(InitCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = ObservabilityConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(cli.log_format.into());
    observability::init(&logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Generate(cmd) => {
            let config = load_config(cli.config.as_deref())?;
            cmd.execute(&config)?;
        }
        Commands::Tree(cmd) => {
            let config = load_config(cli.config.as_deref())?;
            cmd.execute(&config)?;
        }
        Commands::Init(cmd) => {
            cmd.execute()?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<DtoForgeConfig> {
    DtoForgeConfig::load(path).context("Failed to load configuration")
}
