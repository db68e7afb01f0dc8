use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};
use tracing::*;

mod create;
mod dedup;
mod inspect;
mod io;
mod set;

/// A CLI tool for creating and managing compact DTN bundles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging, repeat for more detail. RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new bundle from a payload file.
    Create(create::Command),

    /// Print the fields of one or more bundles.
    Inspect(inspect::Command),

    /// Change fields of an existing bundle.
    Set(set::Command),

    /// Report which bundles are duplicates of earlier ones.
    Dedup(dedup::Command),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => tracing_subscriber::filter::LevelFilter::WARN,
        1 => tracing_subscriber::filter::LevelFilter::INFO,
        2 => tracing_subscriber::filter::LevelFilter::DEBUG,
        _ => tracing_subscriber::filter::LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_target(level > tracing_subscriber::filter::LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Create(args) => args.exec(),
        Commands::Inspect(args) => args.exec(),
        Commands::Set(args) => args.exec(),
        Commands::Dedup(args) => args.exec(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
