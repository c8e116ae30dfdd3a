mod aggregator;
mod amount;
mod classifier;
mod cli;
mod collapse;
mod error;
mod fmt;
mod layout;
mod models;
mod pipeline;
mod reader;
mod report;
mod settings;
mod writer;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spendsheet={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref().map(Path::new);
    let settings = settings::load_settings(config)?;

    match cli.command {
        Commands::Convert {
            file,
            output,
            layout,
            csv_dir,
        } => cli::convert::run(
            &settings,
            &file,
            output.as_deref(),
            layout.as_deref(),
            csv_dir.as_deref(),
        ),
        Commands::Summary { file, layout, json } => {
            cli::summary::run(&settings, &file, layout.as_deref(), json)
        }
        Commands::Layouts => cli::layouts::run(),
        Commands::Config => cli::config::run(&settings, config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
