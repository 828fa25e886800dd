use anyhow::{Context, Result};
use clap::Parser;
use kegg_fetch_core::EntryKind;
use kegg_fetch_core::config::{KeggConfig, LogFormat, LoggingSettings};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level and config path
    let cli = Cli::parse();

    let config = KeggConfig::load(cli.config.as_deref())?;
    config.validate()?;
    config.prepare_dirs()?;

    init_tracing(cli.verbose, &config.logging)?;

    match cli.command {
        Commands::Reaction(args) => {
            info!("Reaction command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::fetch::execute(EntryKind::Reaction, args, &config))?;
        }
        Commands::Compound(args) => {
            info!("Compound command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::fetch::execute(EntryKind::Compound, args, &config))?;
        }
        Commands::Parse(args) => {
            info!("Parse command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::parse::execute(args, &config))?;
        }
        Commands::Equation(args) => {
            cli::commands::equation::execute(args)?;
        }
    }

    Ok(())
}

/// Initialize tracing; `RUST_LOG` wins over `-v`, which wins over the config level
fn init_tracing(verbose: u8, logging: &LoggingSettings) -> Result<()> {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        2.. => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let writer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let layer = fmt::layer().with_writer(writer).with_ansi(logging.file.is_none());

    match logging.format {
        LogFormat::Full => tracing_subscriber::registry().with(filter).with(layer).init(),
        LogFormat::Compact => tracing_subscriber::registry().with(filter).with(layer.compact()).init(),
    }

    Ok(())
}
