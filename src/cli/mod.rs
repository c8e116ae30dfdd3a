pub mod config;
pub mod convert;
pub mod layouts;
pub mod summary;

use clap::{Parser, Subcommand};

use crate::collapse::CollapsePolicy;
use crate::error::Result;
use crate::pipeline::ConvertOptions;
use crate::settings::Settings;

/// Layout from `--layout` (or settings) plus the fixed chart policy.
pub(crate) fn convert_options(settings: &Settings, layout: Option<&str>) -> Result<ConvertOptions> {
    Ok(ConvertOptions {
        layout: settings.resolve_layout(layout)?,
        policy: CollapsePolicy::default(),
        max_rows: settings.max_rows,
    })
}

#[derive(Parser)]
#[command(
    name = "spendsheet",
    version,
    about = "Turn a bank statement spreadsheet into a categorized spending report."
)]
pub struct Cli {
    /// Settings file (default: ~/.config/spendsheet/settings.json)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a statement (.xlsx/.xls) into a spending report workbook.
    Convert {
        /// Path to the bank statement
        file: String,
        /// Report path (default: <name>-budget.xlsx next to the statement)
        #[arg(short, long)]
        output: Option<String>,
        /// Statement layout key (see `spendsheet layouts`)
        #[arg(long)]
        layout: Option<String>,
        /// Also write detail/consolidated/chart CSV files into this directory
        #[arg(long = "csv-dir")]
        csv_dir: Option<String>,
    },
    /// Print the category breakdown without writing a workbook.
    Summary {
        /// Path to the bank statement
        file: String,
        /// Statement layout key (see `spendsheet layouts`)
        #[arg(long)]
        layout: Option<String>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the statement layouts this build understands.
    Layouts,
    /// Show the settings file and the layout in effect.
    Config,
}
