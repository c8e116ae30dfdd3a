use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::Result;
use crate::fmt::rupees;
use crate::pipeline::{self, default_output_path};
use crate::settings::Settings;
use crate::writer::csv_export;

pub fn run(
    settings: &Settings,
    file: &str,
    output: Option<&str>,
    layout: Option<&str>,
    csv_dir: Option<&str>,
) -> Result<()> {
    let input = PathBuf::from(file);
    let options = super::convert_options(settings, layout)?;
    let output = match output {
        Some(path) => PathBuf::from(path),
        None => default_output_path(&input, settings.output_dir().as_deref()),
    };

    let outcome = pipeline::convert(&input, &output, &options)?;
    let report = &outcome.report;

    println!(
        "Converted {} transactions into {} categories ({} chart slices), total {}",
        report.detail.len(),
        report.consolidated.len(),
        report.chart.len(),
        rupees(report.grand_total)
    );
    println!("Report: {} ({} bytes)", outcome.output.display(), outcome.bytes);

    if let Some(dir) = csv_dir {
        let files = csv_export::export(report, Path::new(dir))?;
        for path in files {
            println!("CSV:    {}", path.display());
        }
    }

    let excluded = report.excluded_rows();
    if excluded > 0 {
        println!(
            "{}",
            format!("{excluded} row(s) had amounts that are not numbers and were left out of the totals.")
                .yellow()
        );
    }
    if !report.issues.is_empty() {
        println!("{} amount issue(s); run with -v for details.", report.issues.len());
    }
    Ok(())
}
