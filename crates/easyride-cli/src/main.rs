//! CLI application that sums up EasyRide purchase receipts.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, diag, sum};

/// Extract amounts from EasyRide purchase receipts and sum them up
#[derive(Parser)]
#[command(name = "easyride")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logging level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    loglevel: LogLevel,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sum: sum::SumArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(config::ConfigArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr, the summary line alone to stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.loglevel))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Commands::Config(args)) => config::run(args, config_path),
        None if cli.sum.diag => diag::run(&cli.sum, &commands::load_config(config_path)?),
        None => sum::run(&cli.sum, &commands::load_config(config_path)?),
    }
}
